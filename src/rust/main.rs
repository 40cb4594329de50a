use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use newsclass::web::{app_router, serve, AppState};
use newsclass::{init_logger, AppConfig, ArtifactStore, Dataset, NewsClassifier};

fn load_classifier(config: &AppConfig, store: &ArtifactStore) -> Result<NewsClassifier> {
    let available = store.available_models();
    if available.is_empty() {
        bail!("No model artifacts found in {:?}", store.dir());
    }

    let mut builder = NewsClassifier::builder()
        .with_vectorizer_file(store.vectorizer_path())
        .context("Failed to load the vectorizer")?;

    for model in &available {
        builder = builder
            .add_model_file(model.display_name(), store.model_path(*model))
            .with_context(|| format!("Failed to load {}", model))?;
    }

    if let Some(default_model) = config.default_model {
        if available.contains(&default_model) {
            builder = builder.with_default_model(default_model.display_name());
        } else {
            warn!("Default model {} is not available, using {}", default_model, available[0]);
        }
    }

    Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let config = AppConfig::parse();

    info!("=== Starting News Classifier ===");
    let start_time = Instant::now();

    let store = match &config.artifacts_dir {
        Some(dir) => ArtifactStore::new(dir),
        None => ArtifactStore::new_default(),
    }
    .context("Failed to open the artifacts directory")?;
    info!("Using artifacts from {:?}", store.dir());

    if config.verify {
        store.verify_all().context("Artifact verification failed")?;
    }

    let classifier = load_classifier(&config, &store)?;

    let dataset = match Dataset::from_csv_path(&config.dataset, &config.label_column) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            warn!("Raw dataset {:?} not loaded: {}", config.dataset, e);
            None
        }
    };

    if !config.assets_dir.is_dir() {
        warn!("Assets directory {:?} not found, images and video will be missing", config.assets_dir);
    }

    info!("=== Startup complete (took {:.2?}) ===", start_time.elapsed());

    let state = Arc::new(AppState::new(classifier, dataset));
    let app = app_router(state, &config.assets_dir);
    serve(app, config.bind).await?;

    Ok(())
}
