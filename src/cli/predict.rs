//! CLI entry-point for a one-off prediction against the saved model.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    config::Settings,
    model::{scorer_for, Pipeline},
    recommend::{normalise_symptoms, recommend},
};

/// Args for the `predict` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Free-text symptom description.
    #[arg(long)]
    pub symptoms: String,
    /// Model file to score with.
    #[arg(long)]
    pub model: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let text = normalise_symptoms(&args.symptoms);
    if text.is_empty() {
        bail!("symptoms is required");
    }
    let model_path = args.model.unwrap_or(settings.model_path);
    let pipeline = Pipeline::load(&model_path)
        .with_context(|| format!("loading model {}; run train first", model_path.display()))?;
    let scorer = scorer_for(pipeline);
    let recommendations = recommend(scorer.as_ref(), &text);
    println!("{}", serde_json::to_string_pretty(&recommendations)?);
    Ok(())
}
