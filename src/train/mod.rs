//! Offline training: load the CSV, split, fit the pipeline, evaluate, persist.

pub mod dataset;
pub mod metrics;
pub mod split;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::model::{ClassifierParams, Link, Pipeline};

pub use dataset::{load_examples, Example};
pub use metrics::ClassificationReport;
pub use split::{stratified_split, Split, SplitError};

/// Everything a training run needs; defaults reproduce the fixed recipe.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    pub test_size: f64,
    pub seed: u64,
    pub ngram_range: (usize, usize),
    pub min_df: usize,
    pub classifier: ClassifierParams,
}

impl TrainOptions {
    pub fn new(dataset_path: PathBuf, model_path: PathBuf) -> Self {
        Self {
            dataset_path,
            model_path,
            test_size: 0.2,
            seed: 42,
            ngram_range: (1, 2),
            min_df: 1,
            classifier: ClassifierParams::default(),
        }
    }
}

/// Result of a training run.
#[derive(Debug)]
pub struct TrainOutcome {
    pub pipeline: Pipeline,
    pub report: ClassificationReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Fit and evaluate a pipeline on in-memory examples without touching disk.
pub fn fit_and_evaluate(examples: &[Example], options: &TrainOptions) -> Result<TrainOutcome> {
    let labels: Vec<String> = examples.iter().map(|e| e.label.clone()).collect();
    let Split { train, test } = stratified_split(&labels, options.test_size, options.seed)?;

    let x_train = column(examples, &train, |e| &e.symptoms);
    let y_train = column(examples, &train, |e| &e.label);
    let x_test = column(examples, &test, |e| &e.symptoms);
    let y_test = column(examples, &test, |e| &e.label);

    info!(
        train = train.len(),
        test = test.len(),
        link = ?options.classifier.link,
        "fitting pipeline"
    );
    let pipeline = Pipeline::fit(
        &x_train,
        &y_train,
        options.ngram_range,
        options.min_df,
        &options.classifier,
    )
    .context("fitting tf-idf + one-vs-rest pipeline")?;

    let y_pred = pipeline.predict(&x_test);
    let report = ClassificationReport::new(&y_test, &y_pred);
    info!(accuracy = report.accuracy, "evaluated held-out split");

    Ok(TrainOutcome {
        pipeline,
        report,
        train_rows: train.len(),
        test_rows: test.len(),
    })
}

fn column(examples: &[Example], rows: &[usize], field: fn(&Example) -> &String) -> Vec<String> {
    rows.iter().map(|&i| field(&examples[i]).clone()).collect()
}

/// Full batch job: read the dataset, train, print the report and save the model.
#[instrument(skip(options), fields(dataset = %options.dataset_path.display()))]
pub fn run(options: &TrainOptions) -> Result<TrainOutcome> {
    let examples = load_examples(&options.dataset_path)?;
    let outcome = fit_and_evaluate(&examples, options)?;

    println!("Accuracy: {:.4}", outcome.report.accuracy);
    println!("{}", outcome.report);

    outcome
        .pipeline
        .save(&options.model_path)
        .with_context(|| format!("saving model to {}", options.model_path.display()))?;
    if outcome.pipeline.classifier.link == Link::Margin {
        info!("model saved without probability support; predictions will be unscored");
    }
    Ok(outcome)
}
