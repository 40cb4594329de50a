//! The raw training data the models were fitted on, kept around to describe
//! what the classifier knows about.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use log::info;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Column '{0}' not found in dataset header")]
    MissingColumn(String),
}

/// Category labels of a labelled news dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    label_column: String,
    labels: Vec<String>,
}

impl Dataset {
    pub fn from_csv_path<P: AsRef<Path>>(path: P, label_column: &str) -> Result<Self, DatasetError> {
        let reader = csv::Reader::from_path(path.as_ref())?;
        let dataset = Self::from_csv(reader, label_column)?;
        info!(
            "Loaded dataset from {:?}: {} rows, {} categories",
            path.as_ref(),
            dataset.len(),
            dataset.category_counts().len()
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R, label_column: &str) -> Result<Self, DatasetError> {
        Self::from_csv(csv::Reader::from_reader(reader), label_column)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, label_column: &str) -> Result<Self, DatasetError> {
        let column = reader
            .headers()?
            .iter()
            .position(|h| h.trim() == label_column)
            .ok_or_else(|| DatasetError::MissingColumn(label_column.to_string()))?;

        let mut labels = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let Some(label) = record.get(column).map(str::trim).filter(|l| !l.is_empty()) {
                labels.push(label.to_string());
            }
        }

        Ok(Self {
            label_column: label_column.to_string(),
            labels,
        })
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Number of labelled rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows per category, sorted by category name.
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for label in &self.labels {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        counts
    }
}
