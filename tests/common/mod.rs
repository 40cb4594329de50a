#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::json;
use sha2::{Digest, Sha256};

use newsclass::{ArtifactStore, BuiltinModel, NewsClassifier};

pub const BUSINESS_TEXT: &str = "Stocks and the market react to strong earnings";
pub const SPORTS_TEXT: &str = "A late goal decided the league match";
pub const TECH_TEXT: &str = "New chip and software released today";

pub const TRAIN_CSV: &str = "headlines,description,content,url,category\n\
    Markets rally,Stocks up,Full text,http://a,business\n\
    Cup final,Late goal,Full text,http://b,sports\n\
    Rates again,Central bank,Full text,http://c,business\n\
    New chip,Faster phones,Full text,http://d,technology\n";

fn rows(strong: f32, weak: f32) -> Vec<Vec<f32>> {
    (0..3)
        .map(|class| {
            (0..8)
                .map(|col| {
                    let owner = if col < 3 { 0 } else if col < 6 { 1 } else { 2 };
                    if owner == class { strong } else { weak }
                })
                .collect()
        })
        .collect()
}

/// Writes a vectorizer, all three built-in models, a manifest and a dataset into `dir`.
pub fn write_fixture_artifacts(dir: &Path) {
    let vectorizer = json!({
        "vocabulary": {
            "stocks": 0, "market": 1, "earnings": 2,
            "goal": 3, "league": 4, "match": 5,
            "software": 6, "chip": 7
        },
        "idf": [1.2, 1.1, 1.5, 1.3, 1.4, 1.2, 1.6, 1.9],
        "stop_words": ["the", "and"]
    });
    let classes = ["business", "sports", "technology"];
    let label_names = json!({"business": "Business", "sports": "Sports", "technology": "Technology"});

    let logistic = json!({
        "kind": "logistic_regression",
        "classes": classes,
        "coef": rows(2.0, -1.0),
        "intercept": [0.0, 0.0, 0.0],
        "label_names": label_names.clone()
    });
    let svc = json!({
        "kind": "linear_svc",
        "classes": classes,
        "coef": rows(1.0, -0.5),
        "intercept": [-0.2, -0.2, -0.2],
        "label_names": label_names
    });
    let prior = (1.0f32 / 3.0).ln();
    let naive_bayes = json!({
        "kind": "multinomial_nb",
        "classes": classes,
        "coef": rows(-1.0, -4.0),
        "intercept": [prior, prior, prior]
    });

    let files = [
        ("tfidfvect.json", vectorizer),
        (BuiltinModel::LogisticRegression.file_name(), logistic),
        (BuiltinModel::LinearSvc.file_name(), svc),
        (BuiltinModel::NaiveBayes.file_name(), naive_bayes),
    ];

    let mut manifest = HashMap::new();
    for (name, content) in files {
        let raw = content.to_string();
        manifest.insert(name.to_string(), format!("{:x}", Sha256::digest(raw.as_bytes())));
        fs::write(dir.join(name), raw).unwrap();
    }
    fs::write(
        dir.join("manifest.json"),
        serde_json::to_string(&manifest).unwrap(),
    )
    .unwrap();
    fs::write(dir.join("train.csv"), TRAIN_CSV).unwrap();
}

/// Builds a classifier offering every built-in model from the fixture artifacts.
pub fn build_classifier(dir: &Path) -> NewsClassifier {
    let store = ArtifactStore::new(dir).unwrap();
    let mut builder = NewsClassifier::builder()
        .with_vectorizer_file(store.vectorizer_path())
        .unwrap();
    for model in store.available_models() {
        builder = builder
            .add_model_file(model.display_name(), store.model_path(model))
            .unwrap();
    }
    builder.build().expect("Failed to create classifier")
}
