//! Runtime configuration for the trainer and the inference server.

use std::{env, path::PathBuf};

use serde::Deserialize;

/// Paths and listen address resolved from `.env`, the environment and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Labelled CSV with `symptoms` and `label` columns.
    pub dataset_path: PathBuf,
    /// Serialized pipeline written by `train` and read by `serve`.
    pub model_path: PathBuf,
    /// Interface the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/seed.csv"),
            model_path: PathBuf::from("model.json"),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// Load configuration from the environment, falling back to the fixed defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let dataset_path = env::var("DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset_path);
        let model_path = env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|err| anyhow::anyhow!("invalid PORT {raw:?}: {err}"))?,
            Err(_) => defaults.port,
        };

        Ok(Self {
            dataset_path,
            model_path,
            host,
            port,
        })
    }
}
