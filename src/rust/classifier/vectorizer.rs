use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::info;
use ndarray::Array1;
use regex::Regex;
use serde::Deserialize;

use super::error::ClassifierError;
use super::utils::{normalize_l1, normalize_l2};

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

lazy_static! {
    static ref DEFAULT_TOKEN_REGEX: Regex =
        Regex::new(DEFAULT_TOKEN_PATTERN).expect("default token pattern is valid");
}

/// Normalization applied to each TF-IDF row after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk shape of a fitted vectorizer.
#[derive(Debug, Deserialize)]
struct VectorizerArtifact {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    #[serde(default)]
    stop_words: Vec<String>,
    #[serde(default = "default_token_pattern")]
    token_pattern: String,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

/// A fitted TF-IDF vectorizer that turns raw text into a fixed-length feature vector.
///
/// The fitted state (vocabulary and inverse document frequencies) is loaded from a
/// JSON artifact; this type only applies it:
/// 1. Lowercasing (optional)
/// 2. Tokenization with a regular expression
/// 3. Stop-word removal and n-gram expansion
/// 4. Term counting over the vocabulary, idf weighting and row normalization
///
/// Terms that are not part of the vocabulary are ignored, so text that shares no
/// term with the vocabulary maps to the zero vector.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Array1<f32>,
    lowercase: bool,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    stop_words: HashSet<String>,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Loads a vectorizer artifact from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClassifierError::VectorizerError(format!(
                "Vectorizer file not found: {}",
                path.display()
            )));
        }
        let raw = fs::read_to_string(path)?;
        let vectorizer = Self::from_json(&raw)?;
        info!(
            "Loaded vectorizer from {:?} ({} terms)",
            path,
            vectorizer.vocabulary_size()
        );
        Ok(vectorizer)
    }

    /// Parses and validates a vectorizer artifact.
    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let artifact: VectorizerArtifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, ClassifierError> {
        if artifact.vocabulary.is_empty() {
            return Err(ClassifierError::VectorizerError("Vocabulary cannot be empty".into()));
        }
        if artifact.idf.len() < artifact.vocabulary.len() {
            return Err(ClassifierError::VectorizerError(format!(
                "idf has {} entries but the vocabulary has {} terms",
                artifact.idf.len(),
                artifact.vocabulary.len()
            )));
        }
        if let Some((term, &col)) = artifact
            .vocabulary
            .iter()
            .find(|(_, col)| **col >= artifact.idf.len())
        {
            return Err(ClassifierError::VectorizerError(format!(
                "Term '{}' maps to column {} outside of {} features",
                term,
                col,
                artifact.idf.len()
            )));
        }
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::VectorizerError(format!(
                "Invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let token_pattern = if artifact.token_pattern == DEFAULT_TOKEN_PATTERN {
            DEFAULT_TOKEN_REGEX.clone()
        } else {
            Regex::new(&artifact.token_pattern).map_err(|e| {
                ClassifierError::VectorizerError(format!("Invalid token pattern: {}", e))
            })?
        };

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: Array1::from(artifact.idf),
            lowercase: artifact.lowercase,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            stop_words: artifact.stop_words.into_iter().collect(),
            token_pattern,
        })
    }

    /// Number of columns in the produced feature vectors.
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Splits text into the terms the vocabulary is keyed by, n-grams included.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        // A capture group in the pattern selects the token, as in the fitting side.
        let words: Vec<&str> = if self.token_pattern.captures_len() > 1 {
            self.token_pattern
                .captures_iter(&text)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect()
        } else {
            self.token_pattern
                .find_iter(&text)
                .map(|m| m.as_str())
                .collect()
        };
        let words: Vec<&str> = words
            .into_iter()
            .filter(|w| !self.stop_words.contains(*w))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > words.len() {
                break;
            }
            terms.extend(words.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    /// Counts how many terms of the text are known to the vocabulary.
    pub fn count_known_terms(&self, text: &str) -> usize {
        self.tokenize(text)
            .iter()
            .filter(|t| self.vocabulary.contains_key(*t))
            .count()
    }

    /// Transforms a single document into its TF-IDF feature vector.
    pub fn transform(&self, text: &str) -> Array1<f32> {
        let mut features = Array1::<f32>::zeros(self.idf.len());
        for term in self.tokenize(text) {
            if let Some(&col) = self.vocabulary.get(&term) {
                features[col] += 1.0;
            }
        }

        if self.sublinear_tf {
            features.mapv_inplace(|tf| if tf > 0.0 { 1.0 + tf.ln() } else { 0.0 });
        }
        features *= &self.idf;

        match self.norm {
            Some(Norm::L2) => normalize_l2(&features),
            Some(Norm::L1) => normalize_l1(&features),
            None => features,
        }
    }
}

/// Provides text vectorization to anything that holds a fitted vectorizer.
pub(crate) trait TextVectorizer {
    /// Returns the loaded vectorizer if available
    fn vectorizer(&self) -> Option<&TfidfVectorizer>;

    /// Converts text into a feature vector.
    ///
    /// # Errors
    /// - `VectorizerError` if no vectorizer has been loaded
    fn vectorize(&self, text: &str) -> Result<Array1<f32>, ClassifierError> {
        let vectorizer = self
            .vectorizer()
            .ok_or_else(|| ClassifierError::VectorizerError("Vectorizer not loaded".into()))?;
        Ok(vectorizer.transform(text))
    }

    fn feature_count(&self) -> Option<usize> {
        self.vectorizer().map(TfidfVectorizer::vocabulary_size)
    }
}
