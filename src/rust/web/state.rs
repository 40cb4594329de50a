use crate::classifier::NewsClassifier;
use crate::dataset::Dataset;

/// Everything the pages need, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppState {
    pub classifier: NewsClassifier,
    /// The raw training data, if it could be loaded
    pub dataset: Option<Dataset>,
}

impl AppState {
    pub fn new(classifier: NewsClassifier, dataset: Option<Dataset>) -> Self {
        Self { classifier, dataset }
    }
}
