mod builder;
#[allow(clippy::module_inception)]
mod classifier;
mod error;
mod model;
mod utils;
mod vectorizer;

pub use builder::NewsClassifierBuilder;
pub use classifier::{NewsClassifier, MAX_TEXT_LENGTH};
pub use error::ClassifierError;
pub use model::{LinearModel, ModelKind};
pub use vectorizer::{Norm, TfidfVectorizer};

/// Information about a built classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Where the vectorizer was loaded from, if it came from a file
    pub vectorizer_path: Option<String>,
    /// Length of the feature vectors
    pub vocabulary_size: usize,
    /// Registered model names and their estimator kinds, in registration order
    pub models: Vec<(String, ModelKind)>,
    pub default_model: String,
}
