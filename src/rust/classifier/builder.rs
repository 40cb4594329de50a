use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use log::{error, info};

use super::classifier::{NewsClassifier, RegisteredModel};
use super::error::ClassifierError;
use super::model::LinearModel;
use super::vectorizer::{TextVectorizer, TfidfVectorizer};

/// Maximum number of models a single classifier can offer.
const MAX_MODELS: usize = 16;

/// A builder for constructing a NewsClassifier with a fluent interface.
#[derive(Default, Debug)]
pub struct NewsClassifierBuilder {
    vectorizer_path: Option<String>,
    vectorizer: Option<TfidfVectorizer>,
    models: Vec<RegisteredModel>,
    default_model: Option<String>,
}

impl TextVectorizer for NewsClassifierBuilder {
    fn vectorizer(&self) -> Option<&TfidfVectorizer> {
        self.vectorizer.as_ref()
    }
}

impl NewsClassifierBuilder {
    /// Creates a new empty builder
    ///
    /// # Example
    /// ```
    /// use newsclass::NewsClassifierBuilder;
    ///
    /// let builder = NewsClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the TF-IDF vectorizer from a JSON artifact
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The path is empty
    ///   - A vectorizer is already set
    ///   - The file doesn't exist or is not a valid vectorizer artifact
    pub fn with_vectorizer_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ClassifierError::BuildError("Vectorizer path cannot be empty".into()));
        }
        if self.vectorizer.is_some() {
            return Err(ClassifierError::BuildError("Vectorizer already set".into()));
        }
        let vectorizer = TfidfVectorizer::from_file(path).map_err(|e| {
            error!("Failed to load vectorizer: {}", e);
            e
        })?;
        self.vectorizer_path = Some(path.to_string_lossy().to_string());
        self.vectorizer = Some(vectorizer);
        Ok(self)
    }

    /// Uses an already loaded vectorizer
    pub fn with_vectorizer(mut self, vectorizer: TfidfVectorizer) -> Result<Self, ClassifierError> {
        if self.vectorizer.is_some() {
            return Err(ClassifierError::BuildError("Vectorizer already set".into()));
        }
        self.vectorizer = Some(vectorizer);
        Ok(self)
    }

    /// Registers a model under the name shown to the user
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The name is empty or already taken
    ///   - The maximum number of models is exceeded
    pub fn add_model(mut self, name: impl Into<String>, model: LinearModel) -> Result<Self, ClassifierError> {
        let name = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ClassifierError::ValidationError("Model name cannot be empty".into()));
        }
        if self.models.iter().any(|m| m.name.eq_ignore_ascii_case(&name)) {
            return Err(ClassifierError::ValidationError(format!(
                "Model '{}' is already registered",
                name
            )));
        }
        if self.models.len() >= MAX_MODELS {
            return Err(ClassifierError::ValidationError(format!(
                "Maximum number of models ({}) exceeded",
                MAX_MODELS
            )));
        }
        info!("Registered model '{}' ({})", name, model.kind());
        self.models.push(RegisteredModel { name, model });
        Ok(self)
    }

    /// Loads a model artifact and registers it under `name`
    pub fn add_model_file<P: AsRef<Path>>(
        self,
        name: impl Into<String>,
        path: P,
    ) -> Result<Self, ClassifierError> {
        let model = LinearModel::from_file(path)?;
        self.add_model(name, model)
    }

    /// Picks the model used when a request does not name one.
    /// Defaults to the first registered model.
    pub fn with_default_model(mut self, name: impl Into<String>) -> Self {
        self.default_model = Some(name.into());
        self
    }

    /// Builds and returns the final NewsClassifier instance
    ///
    /// # Returns
    /// * `Result<NewsClassifier, ClassifierError>` - The classifier if successful, or an error if:
    ///   - No vectorizer is set
    ///   - No models have been added
    ///   - A model expects a different number of features than the vectorizer produces
    ///   - The default model is not one of the registered models
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use newsclass::NewsClassifierBuilder;
    ///
    /// let classifier = NewsClassifierBuilder::new()
    ///     .with_vectorizer_file("artifacts/tfidfvect.json")?
    ///     .add_model_file("Logistic Regression", "artifacts/logistic_regression.json")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<NewsClassifier, ClassifierError> {
        let n_features = self
            .feature_count()
            .ok_or_else(|| ClassifierError::BuildError("A vectorizer must be set".into()))?;
        if self.models.is_empty() {
            return Err(ClassifierError::BuildError("At least one model must be added".into()));
        }

        for registered in &self.models {
            if registered.model.n_features() != n_features {
                return Err(ClassifierError::BuildError(format!(
                    "Model '{}' expects {} features but the vectorizer produces {}",
                    registered.name,
                    registered.model.n_features(),
                    n_features
                )));
            }
        }

        let names: HashSet<&str> = self.models.iter().map(|m| m.name.as_str()).collect();
        let default_model = match self.default_model {
            Some(name) => names
                .iter()
                .find(|n| n.eq_ignore_ascii_case(name.trim()))
                .map(|n| n.to_string())
                .ok_or_else(|| {
                    ClassifierError::BuildError(format!("Default model '{}' is not registered", name))
                })?,
            None => self.models[0].name.clone(),
        };

        let vectorizer = self
            .vectorizer
            .ok_or_else(|| ClassifierError::BuildError("No vectorizer loaded".into()))?;

        info!(
            "Classifier ready: {} model(s), {} features, default '{}'",
            self.models.len(),
            n_features,
            default_model
        );

        Ok(NewsClassifier {
            vectorizer_path: self.vectorizer_path,
            vectorizer: Arc::new(vectorizer),
            models: Arc::new(self.models),
            default_model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vectorizer() -> TfidfVectorizer {
        let raw = json!({"vocabulary": {"market": 0, "goal": 1}, "idf": [1.0, 1.0]});
        TfidfVectorizer::from_json(&raw.to_string()).unwrap()
    }

    fn model(n_features: usize) -> LinearModel {
        let raw = json!({
            "kind": "linear_svc",
            "classes": ["business", "sports"],
            "coef": [vec![1.0; n_features], vec![0.5; n_features]],
            "intercept": [0.0, 0.0]
        });
        LinearModel::from_json(&raw.to_string()).unwrap()
    }

    #[test]
    fn test_build_requires_vectorizer() {
        let result = NewsClassifierBuilder::new().add_model("svc", model(2)).unwrap().build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_build_requires_models() {
        let result = NewsClassifierBuilder::new().with_vectorizer(vectorizer()).unwrap().build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_feature_count_mismatch() {
        let result = NewsClassifierBuilder::new()
            .with_vectorizer(vectorizer())
            .unwrap()
            .add_model("svc", model(3))
            .unwrap()
            .build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_model_name_validation() {
        assert!(NewsClassifierBuilder::new().add_model("  ", model(2)).is_err());
        assert!(NewsClassifierBuilder::new()
            .add_model("SVC", model(2))
            .unwrap()
            .add_model("svc", model(2))
            .is_err());
    }

    #[test]
    fn test_default_model_selection() {
        let classifier = NewsClassifierBuilder::new()
            .with_vectorizer(vectorizer())
            .unwrap()
            .add_model("first", model(2))
            .unwrap()
            .add_model("second", model(2))
            .unwrap()
            .with_default_model("SECOND")
            .build()
            .unwrap();
        assert_eq!(classifier.default_model(), "second");

        let result = NewsClassifierBuilder::new()
            .with_vectorizer(vectorizer())
            .unwrap()
            .add_model("first", model(2))
            .unwrap()
            .with_default_model("missing")
            .build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_vectorizer_set_twice() {
        let result = NewsClassifierBuilder::new()
            .with_vectorizer(vectorizer())
            .unwrap()
            .with_vectorizer(vectorizer());
        assert!(result.is_err());
    }
}
