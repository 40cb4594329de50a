//! A small web application that classifies news articles with pre-trained
//! TF-IDF linear models.
//!
//! The library side loads a fitted vectorizer and one or more classifier
//! artifacts and exposes them through a thread-safe [`NewsClassifier`]; the
//! [`web`] module puts a three-page HTML interface in front of it.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use newsclass::{ArtifactStore, BuiltinModel, NewsClassifier};
//!
//! let store = ArtifactStore::new("artifacts")?;
//! let classifier = NewsClassifier::builder()
//!     .with_vectorizer_file(store.vectorizer_path())?
//!     .add_model_file(
//!         BuiltinModel::LogisticRegression.display_name(),
//!         store.model_path(BuiltinModel::LogisticRegression),
//!     )?
//!     .build()?;
//!
//! let (label, scores) = classifier.predict_default("The central bank raised rates again")?;
//! println!("Text Categorized as: {}", label);
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod models;
pub mod web;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use classifier::{
    ClassifierError, ClassifierInfo, LinearModel, ModelKind, NewsClassifier, NewsClassifierBuilder,
    TfidfVectorizer,
};
pub use config::AppConfig;
pub use dataset::{Dataset, DatasetError};
pub use models::BuiltinModel;

pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
