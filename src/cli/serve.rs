//! CLI entry-point for serving the prediction API.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    api::{self, AppState},
    config::Settings,
};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind (default from PORT, else 8000).
    #[arg(long)]
    pub port: Option<u16>,
    /// Host address (default from HOST, else all interfaces).
    #[arg(long)]
    pub host: Option<String>,
    /// Model file to load at startup.
    #[arg(long)]
    pub model: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let model_path = args.model.unwrap_or(settings.model_path);
    let state = AppState::load(&model_path);
    let host = args.host.unwrap_or(settings.host);
    api::serve(state, &host, args.port.unwrap_or(settings.port)).await
}
