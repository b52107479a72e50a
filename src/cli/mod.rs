//! Command-line interface wiring for medicine-recommender.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod predict;
pub mod serve;
pub mod train;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Symptom-to-medicine classifier", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Train(args) => train::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Predict(args) => predict::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fit the TF-IDF + logistic pipeline and write the model file.
    Train(train::Args),
    /// Serve `/health` and `/predict` over HTTP.
    Serve(serve::Args),
    /// Print recommendations for one symptom description.
    Predict(predict::Args),
}
