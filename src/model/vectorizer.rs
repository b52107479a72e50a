//! Word n-gram TF-IDF vectorizer.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ModelError;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    // Two or more word characters, the usual bag-of-words token pattern.
    Regex::new(r"\b\w\w+\b").expect("valid token regex")
});

/// Split lower-cased text into word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fitted TF-IDF transform with smoothed idf and L2 row normalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub ngram_range: (usize, usize),
    pub min_df: usize,
    pub vocabulary: BTreeMap<String, usize>,
    pub idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from `documents`.
    pub fn fit(
        documents: &[String],
        ngram_range: (usize, usize),
        min_df: usize,
    ) -> Result<Self, ModelError> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::InvalidNgramRange(min_n, max_n));
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: BTreeSet<String> = ngrams(doc, ngram_range).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::new();
        for (term, df) in document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= min_df)
        {
            vocabulary.insert(term, idf.len());
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }
        if vocabulary.is_empty() {
            return Err(ModelError::EmptyVocabulary);
        }

        Ok(Self {
            ngram_range,
            min_df,
            vocabulary,
            idf,
        })
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Transform documents into a dense `(n_docs, n_features)` matrix.
    /// Terms outside the vocabulary are dropped.
    pub fn transform(&self, documents: &[String]) -> Array2<f64> {
        let mut matrix = Array2::<f64>::zeros((documents.len(), self.n_features()));
        for (row_idx, doc) in documents.iter().enumerate() {
            let mut row = matrix.row_mut(row_idx);
            for term in ngrams(doc, self.ngram_range) {
                if let Some(&col) = self.vocabulary.get(&term) {
                    row[col] += 1.0;
                }
            }
            for (col, value) in row.iter_mut().enumerate() {
                *value *= self.idf[col];
            }
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }
        matrix
    }
}

fn ngrams(text: &str, (min_n, max_n): (usize, usize)) -> Vec<String> {
    let tokens = tokenize(text);
    let mut out = Vec::new();
    for n in min_n..=max_n {
        if n > tokens.len() {
            break;
        }
        out.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    out
}
