//! Text classification pipeline: TF-IDF features feeding a one-vs-rest classifier.

pub mod classifier;
pub mod scorer;
pub mod vectorizer;

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use classifier::{ClassifierParams, Link, OneVsRestClassifier};
pub use scorer::{scorer_for, HardLabelScorer, ProbabilisticScorer, ScoredLabel, Scorer};
pub use vectorizer::TfidfVectorizer;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("model file is not a valid pipeline: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid n-gram range ({0}, {1})")]
    InvalidNgramRange(usize, usize),
    #[error("vocabulary is empty; no document produced a usable token")]
    EmptyVocabulary,
    #[error("need at least two classes for one-vs-rest, found {0}")]
    TooFewClasses(usize),
    #[error("expected {expected} rows, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("fitting class {class:?} failed: {reason}")]
    Fit { class: String, reason: String },
    #[error("class {class:?} did not converge within {max_iterations} iterations")]
    NotConverged { class: String, max_iterations: u64 },
}

/// The persisted artefact: a fitted vectorizer and the classifier trained on its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub vectorizer: TfidfVectorizer,
    pub classifier: OneVsRestClassifier,
}

impl Pipeline {
    /// Fit the vectorizer on `documents`, then the classifier on the resulting features.
    pub fn fit(
        documents: &[String],
        labels: &[String],
        ngram_range: (usize, usize),
        min_df: usize,
        params: &ClassifierParams,
    ) -> Result<Self, ModelError> {
        let vectorizer = TfidfVectorizer::fit(documents, ngram_range, min_df)?;
        let features = vectorizer.transform(documents);
        let classifier = OneVsRestClassifier::fit(&features, labels, params)?;
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classifier.classes
    }

    /// Predict hard labels for a batch of documents.
    pub fn predict(&self, documents: &[String]) -> Vec<String> {
        let features = self.vectorizer.transform(documents);
        self.classifier.predict(features.view())
    }

    /// Class probabilities for a single document, aligned with [`Pipeline::classes`].
    pub fn predict_proba_one(&self, text: &str) -> Vec<f64> {
        let features = self.vectorizer.transform(&[text.to_string()]);
        self.classifier.predict_proba(features.row(0))
    }

    /// Hard label for a single document.
    pub fn predict_one(&self, text: &str) -> String {
        let features = self.vectorizer.transform(&[text.to_string()]);
        self.classifier.predict_one(features.row(0)).to_string()
    }

    /// Serialize the whole pipeline, replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        info!(path = %path.display(), classes = self.classes().len(), "saved pipeline");
        Ok(())
    }

    /// Load a pipeline written by [`Pipeline::save`] and check its shapes line up.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let reader = BufReader::new(File::open(path)?);
        let pipeline: Self = serde_json::from_reader(reader)?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let clf = &self.classifier;
        if clf.classes.len() < 2 {
            return Err(ModelError::TooFewClasses(clf.classes.len()));
        }
        if clf.coef.len() != clf.classes.len() || clf.intercept.len() != clf.classes.len() {
            return Err(ModelError::DimensionMismatch {
                expected: clf.classes.len(),
                found: clf.coef.len().min(clf.intercept.len()),
            });
        }
        let n_features = self.vectorizer.n_features();
        if let Some(row) = clf.coef.iter().find(|row| row.len() != n_features) {
            return Err(ModelError::DimensionMismatch {
                expected: n_features,
                found: row.len(),
            });
        }
        Ok(())
    }
}
