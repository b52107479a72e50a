//! `medicine-recommender` binary: `train` fits and saves the symptom classifier,
//! `serve` exposes it over HTTP, `predict` scores one description locally.

use anyhow::Result;
use medicine_recommender::{cli::Cli, config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    info!(
        dataset = %settings.dataset_path.display(),
        model = %settings.model_path.display(),
        ?cli,
        "medicine-recommender starting"
    );
    cli.dispatch(settings).await
}
