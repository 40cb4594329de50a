use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use super::builder::NewsClassifierBuilder;
use super::error::ClassifierError;
use super::model::{LinearModel, ModelKind};
use super::vectorizer::{TextVectorizer, TfidfVectorizer};
use super::ClassifierInfo;

/// Longest input accepted by `predict`, in characters.
pub const MAX_TEXT_LENGTH: usize = 100_000;

/// A model together with the name it is offered under.
#[derive(Debug, Clone)]
pub(crate) struct RegisteredModel {
    pub(crate) name: String,
    pub(crate) model: LinearModel,
}

/// A thread-safe news classifier: one TF-IDF vectorizer shared by several
/// pre-trained linear models.
///
/// This type is automatically `Send + Sync`; the vectorizer and the model list
/// are immutable after construction and held in `Arc`s, so cloning is cheap.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use newsclass::NewsClassifier;
///
/// let classifier = NewsClassifier::builder()
///     .with_vectorizer_file("artifacts/tfidfvect.json")?
///     .add_model_file("Logistic Regression", "artifacts/logistic_regression.json")?
///     .build()?;
///
/// let (label, scores) = classifier.predict("Stocks rallied after the earnings call", "Logistic Regression")?;
/// println!("Text Categorized as: {}", label);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NewsClassifier {
    pub(crate) vectorizer_path: Option<String>,
    pub(crate) vectorizer: Arc<TfidfVectorizer>,
    pub(crate) models: Arc<Vec<RegisteredModel>>,
    pub(crate) default_model: String,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<NewsClassifier>();
    }
};

impl TextVectorizer for NewsClassifier {
    fn vectorizer(&self) -> Option<&TfidfVectorizer> {
        Some(&self.vectorizer)
    }
}

impl NewsClassifier {
    /// Creates a new NewsClassifierBuilder for fluent construction
    pub fn builder() -> NewsClassifierBuilder {
        NewsClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            vectorizer_path: self.vectorizer_path.clone(),
            vocabulary_size: self.vectorizer.vocabulary_size(),
            models: self
                .models
                .iter()
                .map(|m| (m.name.clone(), m.model.kind()))
                .collect(),
            default_model: self.default_model.clone(),
        }
    }

    /// Names of the registered models, in registration order.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Looks a model up by name, ignoring case.
    pub fn model(&self, name: &str) -> Option<&LinearModel> {
        self.find(name).map(|m| &m.model)
    }

    pub fn model_kind(&self, name: &str) -> Option<ModelKind> {
        self.model(name).map(LinearModel::kind)
    }

    fn find(&self, name: &str) -> Option<&RegisteredModel> {
        let name = name.trim();
        self.models.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Predicts the category of the input text with the named model.
    ///
    /// # Returns
    /// A tuple containing:
    /// * The predicted category, using the model's display label if it has one
    /// * A HashMap of categories to their confidence (summing to 1.0)
    ///
    /// # Errors
    /// * `ValidationError` if the text is blank or longer than `MAX_TEXT_LENGTH`
    /// * `UnknownModel` if no model is registered under `model_name`
    pub fn predict(
        &self,
        text: &str,
        model_name: &str,
    ) -> Result<(String, HashMap<String, f32>), ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::ValidationError("Input text cannot be empty".into()));
        }
        let length = text.chars().count();
        if length > MAX_TEXT_LENGTH {
            return Err(ClassifierError::ValidationError(format!(
                "Input text too long: {} characters (max: {})",
                length, MAX_TEXT_LENGTH
            )));
        }
        let registered = self
            .find(model_name)
            .ok_or_else(|| ClassifierError::UnknownModel(model_name.to_string()))?;

        let features = self.vectorize(text)?;
        debug!(
            "Vectorized {} characters into {} known terms",
            length,
            self.vectorizer.count_known_terms(text)
        );

        let model = &registered.model;
        let class = model.predict(&features)?;
        let scores = model
            .predict_scores(&features)?
            .into_iter()
            .map(|(class, score)| (model.display_label(&class).to_string(), score))
            .collect();

        Ok((model.display_label(&class).to_string(), scores))
    }

    /// Predicts with the default model.
    pub fn predict_default(&self, text: &str) -> Result<(String, HashMap<String, f32>), ClassifierError> {
        self.predict(text, &self.default_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup_test_classifier() -> NewsClassifier {
        let vectorizer = json!({
            "vocabulary": {"stocks": 0, "market": 1, "goal": 2, "league": 3},
            "idf": [1.0, 1.0, 1.0, 1.0]
        });
        let model = json!({
            "kind": "logistic_regression",
            "classes": ["business", "sports"],
            "coef": [[2.0, 2.0, -1.0, -1.0], [-1.0, -1.0, 2.0, 2.0]],
            "intercept": [0.0, 0.0],
            "label_names": {"business": "Business", "sports": "Sports"}
        });
        NewsClassifier::builder()
            .with_vectorizer(TfidfVectorizer::from_json(&vectorizer.to_string()).unwrap())
            .unwrap()
            .add_model("Logistic Regression", LinearModel::from_json(&model.to_string()).unwrap())
            .unwrap()
            .build()
            .expect("Failed to create classifier")
    }

    #[test]
    fn test_predict_uses_display_labels() {
        let classifier = setup_test_classifier();
        let (label, scores) = classifier
            .predict("The stocks market closed higher", "Logistic Regression")
            .unwrap();
        assert_eq!(label, "Business");
        assert!(scores.contains_key("Sports"));
        assert!(scores["Business"] > scores["Sports"]);
    }

    #[test]
    fn test_model_lookup_ignores_case() {
        let classifier = setup_test_classifier();
        let (label, _) = classifier.predict("late goal wins the league", "logistic regression").unwrap();
        assert_eq!(label, "Sports");
        assert_eq!(classifier.model_kind("LOGISTIC REGRESSION"), Some(ModelKind::LogisticRegression));
    }

    #[test]
    fn test_predict_validation() {
        let classifier = setup_test_classifier();
        assert!(matches!(
            classifier.predict("   ", "Logistic Regression"),
            Err(ClassifierError::ValidationError(_))
        ));
        let long_text = "a".repeat(MAX_TEXT_LENGTH + 1);
        assert!(matches!(
            classifier.predict(&long_text, "Logistic Regression"),
            Err(ClassifierError::ValidationError(_))
        ));
        assert!(matches!(
            classifier.predict("stocks", "Random Forest"),
            Err(ClassifierError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_predict_accepts_max_length() {
        let classifier = setup_test_classifier();
        let mut text = "stocks ".repeat(MAX_TEXT_LENGTH / 7);
        text.push_str(&"x".repeat(MAX_TEXT_LENGTH - text.len()));
        assert_eq!(text.chars().count(), MAX_TEXT_LENGTH);

        let (label, _) = classifier.predict(&text, "Logistic Regression").unwrap();
        assert_eq!(label, "Business");
    }

    #[test]
    fn test_class_info() {
        let classifier = setup_test_classifier();
        let info = classifier.info();
        assert_eq!(info.vocabulary_size, 4);
        assert_eq!(info.models.len(), 1);
        assert_eq!(info.default_model, "Logistic Regression");
        assert!(info.vectorizer_path.is_none());
        assert_eq!(classifier.model_names(), vec!["Logistic Regression"]);
    }
}
