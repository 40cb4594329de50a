use std::io;

/// Represents the different types of errors that can occur in the news classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Error occurred while loading or applying the TF-IDF vectorizer
    #[error("Vectorizer error: {0}")]
    VectorizerError(String),
    /// Error occurred while loading a classifier artifact
    #[error("Model error: {0}")]
    ModelError(String),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// Error occurred while making predictions
    #[error("Prediction error: {0}")]
    PredictionError(String),
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// The requested model was never registered with the classifier
    #[error("Unknown model '{0}'")]
    UnknownModel(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ClassifierError {
    /// Whether the error was caused by what the user typed or picked, as opposed
    /// to a broken artifact.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::UnknownModel(_))
    }
}
