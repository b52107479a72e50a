//! CSV loading for labelled symptom descriptions.

use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::info;

/// One labelled row. Symptoms are lower-cased on load; labels keep their case.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Example {
    pub symptoms: String,
    pub label: String,
}

/// Read a `symptoms,label` CSV from disk.
pub fn load_examples(path: &Path) -> Result<Vec<Example>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening dataset {}", path.display()))?;
    let examples =
        read_examples(file).with_context(|| format!("parsing dataset {}", path.display()))?;
    info!(path = %path.display(), rows = examples.len(), "loaded dataset");
    Ok(examples)
}

/// Parse CSV rows from any reader. Extra columns are ignored.
pub fn read_examples<R: Read>(reader: R) -> Result<Vec<Example>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(reader);
    let mut out = Vec::new();
    for row in reader.deserialize::<Example>() {
        let mut example = row?;
        example.symptoms = example.symptoms.to_lowercase();
        out.push(example);
    }
    Ok(out)
}
