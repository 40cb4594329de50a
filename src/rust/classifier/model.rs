use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use log::info;
use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::error::ClassifierError;
use super::utils::{sigmoid, softmax};

/// The estimator family a linear model artifact was fitted with.
///
/// All three share the same decision rule (`coef · x + intercept`, arg-max over
/// classes) and differ only in how scores are turned into confidences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    LinearSvc,
    /// Multinomial naive Bayes; `coef` holds the feature log probabilities and
    /// `intercept` the class log priors.
    MultinomialNb,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogisticRegression => write!(f, "Logistic Regression"),
            Self::LinearSvc => write!(f, "Linear SVC"),
            Self::MultinomialNb => write!(f, "Multinomial Naive Bayes"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    kind: ModelKind,
    classes: Vec<String>,
    coef: Vec<Vec<f32>>,
    intercept: Vec<f32>,
    #[serde(default)]
    label_names: HashMap<String, String>,
}

impl ModelArtifact {
    fn validate(&self) -> Result<(), ClassifierError> {
        if self.classes.len() < 2 {
            return Err(ClassifierError::ModelError(format!(
                "A classifier needs at least 2 classes, found {}",
                self.classes.len()
            )));
        }
        if self.classes.iter().any(|c| c.is_empty()) {
            return Err(ClassifierError::ModelError("Class labels cannot be empty".into()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ClassifierError::ModelError(format!("Duplicate class label '{}'", dup)));
        }
        // Scores are keyed by display label, so two classes must never share one.
        let mut shown = HashSet::new();
        if let Some(dup) = self
            .classes
            .iter()
            .map(|c| self.label_names.get(c).map(String::as_str).unwrap_or(c.as_str()))
            .find(|label| !shown.insert(*label))
        {
            return Err(ClassifierError::ModelError(format!(
                "Display label '{}' is used by more than one class",
                dup
            )));
        }
        if self.coef.len() != self.intercept.len() {
            return Err(ClassifierError::ModelError(format!(
                "coef has {} rows but intercept has {} entries",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let binary = self.classes.len() == 2 && self.coef.len() == 1;
        if !binary && self.coef.len() != self.classes.len() {
            return Err(ClassifierError::ModelError(format!(
                "coef has {} rows for {} classes",
                self.coef.len(),
                self.classes.len()
            )));
        }
        let n_features = self.coef.first().map(Vec::len).unwrap_or(0);
        if n_features == 0 {
            return Err(ClassifierError::ModelError("coef rows cannot be empty".into()));
        }
        if let Some(pos) = self.coef.iter().position(|row| row.len() != n_features) {
            return Err(ClassifierError::ModelError(format!(
                "coef row {} has {} columns, expected {}",
                pos,
                self.coef[pos].len(),
                n_features
            )));
        }
        Ok(())
    }
}

/// A pre-trained linear classifier mapping a feature vector to a category label.
#[derive(Debug, Clone)]
pub struct LinearModel {
    kind: ModelKind,
    classes: Vec<String>,
    coef: Array2<f32>,
    intercept: Array1<f32>,
    label_names: HashMap<String, String>,
}

impl LinearModel {
    /// Loads a classifier artifact from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClassifierError::ModelError(format!(
                "Model file not found: {}",
                path.display()
            )));
        }
        let raw = fs::read_to_string(path)?;
        let model = Self::from_json(&raw)?;
        info!(
            "Loaded {} model from {:?} ({} classes, {} features)",
            model.kind,
            path,
            model.classes.len(),
            model.n_features()
        );
        Ok(model)
    }

    /// Parses and validates a classifier artifact.
    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let artifact: ModelArtifact = serde_json::from_str(raw)?;
        artifact.validate()?;

        let rows = artifact.coef.len();
        let cols = artifact.coef[0].len();
        let coef = Array2::from_shape_vec((rows, cols), artifact.coef.concat())
            .map_err(|e| ClassifierError::ModelError(format!("Failed to build coef matrix: {}", e)))?;

        Ok(Self {
            kind: artifact.kind,
            classes: artifact.classes,
            coef,
            intercept: Array1::from(artifact.intercept),
            label_names: artifact.label_names,
        })
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of features the model expects.
    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    /// Human readable name for a class, falling back to the raw label.
    pub fn display_label<'a>(&'a self, class: &'a str) -> &'a str {
        self.label_names.get(class).map(String::as_str).unwrap_or(class)
    }

    /// Raw decision scores, one per class, in `classes()` order.
    pub fn decision_function(&self, features: &Array1<f32>) -> Result<Vec<f32>, ClassifierError> {
        if features.len() != self.n_features() {
            return Err(ClassifierError::PredictionError(format!(
                "Feature dimension mismatch: expected {}, got {}",
                self.n_features(),
                features.len()
            )));
        }
        let scores = self.coef.dot(features) + &self.intercept;
        if self.coef.nrows() == 1 {
            // Binary model: a single margin in favor of the second class.
            let margin = scores[0];
            return Ok(vec![-margin, margin]);
        }
        Ok(scores.to_vec())
    }

    /// Predicts the class label of a feature vector. Ties resolve to the first class.
    pub fn predict(&self, features: &Array1<f32>) -> Result<String, ClassifierError> {
        let scores = self.decision_function(features)?;
        let best = scores
            .iter()
            .enumerate()
            .fold(0, |best, (i, &s)| if s > scores[best] { i } else { best });
        Ok(self.classes[best].clone())
    }

    /// Confidence for every class, summing to one.
    pub fn predict_scores(&self, features: &Array1<f32>) -> Result<HashMap<String, f32>, ClassifierError> {
        let scores = self.decision_function(features)?;
        let probabilities = match self.kind {
            ModelKind::LogisticRegression if self.coef.nrows() == 1 => {
                let p = sigmoid(scores[1]);
                vec![1.0 - p, p]
            }
            _ => softmax(&scores),
        };
        Ok(self
            .classes
            .iter()
            .cloned()
            .zip(probabilities)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use serde_json::json;

    fn multiclass(kind: &str) -> LinearModel {
        let raw = json!({
            "kind": kind,
            "classes": ["business", "sports", "technology"],
            "coef": [[2.0, 0.0], [0.0, 2.0], [1.0, 1.0]],
            "intercept": [0.0, 0.0, -0.5],
            "label_names": {"business": "Business"}
        });
        LinearModel::from_json(&raw.to_string()).unwrap()
    }

    #[test]
    fn test_multiclass_predict() {
        let model = multiclass("logistic_regression");
        assert_eq!(model.predict(&array![1.0, 0.0]).unwrap(), "business");
        assert_eq!(model.predict(&array![0.0, 1.0]).unwrap(), "sports");
    }

    #[test]
    fn test_zero_features_use_intercept() {
        let model = multiclass("linear_svc");
        // business and sports tie at 0.0; the first class wins.
        assert_eq!(model.predict(&array![0.0, 0.0]).unwrap(), "business");
    }

    #[test]
    fn test_binary_model() {
        let raw = json!({
            "kind": "logistic_regression",
            "classes": ["fake", "real"],
            "coef": [[1.0, -1.0]],
            "intercept": [0.0]
        });
        let model = LinearModel::from_json(&raw.to_string()).unwrap();
        assert_eq!(model.predict(&array![2.0, 0.0]).unwrap(), "real");
        assert_eq!(model.predict(&array![0.0, 2.0]).unwrap(), "fake");

        let scores = model.predict_scores(&array![2.0, 0.0]).unwrap();
        assert!((scores["real"] - sigmoid(2.0)).abs() < 1e-6);
        assert!((scores["real"] + scores["fake"] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scores_sum_to_one() {
        let model = multiclass("multinomial_nb");
        let scores = model.predict_scores(&array![0.3, 0.7]).unwrap();
        let total: f32 = scores.values().sum();
        assert_eq!(scores.len(), 3);
        assert!((total - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = multiclass("linear_svc");
        let err = model.predict(&array![1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, ClassifierError::PredictionError(_)));
    }

    #[test]
    fn test_display_label() {
        let model = multiclass("linear_svc");
        assert_eq!(model.display_label("business"), "Business");
        assert_eq!(model.display_label("sports"), "sports");
    }

    #[test]
    fn test_invalid_artifacts() {
        let too_few_classes = json!({
            "kind": "linear_svc", "classes": ["only"], "coef": [[1.0]], "intercept": [0.0]
        });
        let ragged = json!({
            "kind": "linear_svc", "classes": ["a", "b", "c"],
            "coef": [[1.0], [1.0, 2.0], [0.0]], "intercept": [0.0, 0.0, 0.0]
        });
        let row_mismatch = json!({
            "kind": "linear_svc", "classes": ["a", "b", "c"],
            "coef": [[1.0], [1.0]], "intercept": [0.0, 0.0]
        });
        for raw in [too_few_classes, ragged, row_mismatch] {
            assert!(matches!(
                LinearModel::from_json(&raw.to_string()),
                Err(ClassifierError::ModelError(_))
            ));
        }
    }

    #[test]
    fn test_rejects_duplicate_classes() {
        let raw = json!({
            "kind": "logistic_regression", "classes": ["x", "x", "y"],
            "coef": [[1.0], [0.5], [0.0]], "intercept": [0.0, 0.0, 0.0]
        });
        let err = LinearModel::from_json(&raw.to_string()).unwrap_err();
        assert!(matches!(err, ClassifierError::ModelError(ref msg) if msg.contains("'x'")));
    }

    #[test]
    fn test_rejects_shared_display_labels() {
        let shared = json!({
            "kind": "linear_svc", "classes": ["a", "b", "c"],
            "coef": [[1.0], [0.5], [0.0]], "intercept": [0.0, 0.0, 0.0],
            "label_names": {"b": "Other", "c": "Other"}
        });
        // A display label may not shadow another class's raw label either.
        let shadowing = json!({
            "kind": "linear_svc", "classes": ["a", "b"],
            "coef": [[1.0], [0.5]], "intercept": [0.0, 0.0],
            "label_names": {"b": "a"}
        });
        for raw in [shared, shadowing] {
            assert!(matches!(
                LinearModel::from_json(&raw.to_string()),
                Err(ClassifierError::ModelError(_))
            ));
        }
    }

    #[test]
    fn test_unknown_kind() {
        let raw = json!({
            "kind": "random_forest", "classes": ["a", "b"], "coef": [[1.0]], "intercept": [0.0]
        });
        assert!(matches!(
            LinearModel::from_json(&raw.to_string()),
            Err(ClassifierError::JsonError(_))
        ));
    }
}
