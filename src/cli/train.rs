//! CLI entry-point for training the classifier.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    model::Link,
    train::{self, TrainOptions},
};

/// Args for the `train` command. Every flag is optional.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Labelled CSV with `symptoms` and `label` columns.
    #[arg(long)]
    pub dataset: Option<PathBuf>,
    /// Where to write the fitted pipeline.
    #[arg(long)]
    pub model: Option<PathBuf>,
    /// Fraction of rows held out for evaluation.
    #[arg(long, default_value_t = 0.2)]
    pub test_size: f64,
    /// Seed for the stratified shuffle.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Iteration cap for each binary logistic fit.
    #[arg(long, default_value_t = 1000)]
    pub max_iterations: u64,
    /// Save a model that only produces hard labels.
    #[arg(long)]
    pub no_probabilities: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let mut options = TrainOptions::new(
        args.dataset.unwrap_or(settings.dataset_path),
        args.model.unwrap_or(settings.model_path),
    );
    options.test_size = args.test_size;
    options.seed = args.seed;
    options.classifier.max_iterations = args.max_iterations;
    if args.no_probabilities {
        options.classifier.link = Link::Margin;
    }

    let model_path = options.model_path.clone();
    let outcome = tokio::task::spawn_blocking(move || train::run(&options))
        .await
        .context("training task panicked")??;

    info!(
        path = %model_path.display(),
        train = outcome.train_rows,
        test = outcome.test_rows,
        accuracy = outcome.report.accuracy,
        "training complete"
    );
    Ok(())
}
