use std::fmt;
use std::str::FromStr;

/// File name of the fitted TF-IDF vectorizer inside an artifacts directory.
pub const VECTORIZER_FILE: &str = "tfidfvect.json";

/// The pre-trained classifiers the application knows how to find on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinModel {
    /// Multinomial logistic regression, the default choice
    LogisticRegression,
    /// Linear support vector classifier
    LinearSvc,
    /// Multinomial naive Bayes
    NaiveBayes,
}

impl BuiltinModel {
    /// All built-in models, in the order they are offered to the user.
    pub fn all() -> [BuiltinModel; 3] {
        [Self::LogisticRegression, Self::LinearSvc, Self::NaiveBayes]
    }

    /// Artifact file name of the model inside an artifacts directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::LogisticRegression => "logistic_regression.json",
            Self::LinearSvc => "linear_svc.json",
            Self::NaiveBayes => "naive_bayes.json",
        }
    }

    /// Name shown in the model selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LogisticRegression => "Logistic Regression",
            Self::LinearSvc => "Linear SVC",
            Self::NaiveBayes => "Naive Bayes",
        }
    }

    fn stem(&self) -> &'static str {
        self.file_name().trim_end_matches(".json")
    }
}

impl fmt::Display for BuiltinModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for BuiltinModel {
    type Err = String;

    /// Accepts either the file stem (`linear_svc`) or the display name
    /// (`Linear SVC`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|m| {
                m.stem().eq_ignore_ascii_case(wanted) || m.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown model '{}'", s))
    }
}
