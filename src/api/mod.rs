//! HTTP layer: health check and symptom prediction.

pub mod error;
pub mod routes;
pub mod types;

use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::model::{scorer_for, Pipeline, Scorer};

pub use error::ApiError;

/// Shared, read-only server state. The scorer is set once at startup, never replaced.
#[derive(Clone, Default)]
pub struct AppState {
    scorer: Option<Arc<dyn Scorer>>,
}

impl AppState {
    /// State with no model; `/predict` answers 503.
    pub fn without_model() -> Self {
        Self::default()
    }

    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self::with_scorer(scorer_for(pipeline))
    }

    pub fn with_scorer(scorer: Arc<dyn Scorer>) -> Self {
        Self {
            scorer: Some(scorer),
        }
    }

    /// Try to load the pipeline at `path`. A missing or unreadable file leaves
    /// the server running without a model.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            warn!(path = %path.display(), "model file missing; run train first");
            return Self::without_model();
        }
        match Pipeline::load(path) {
            Ok(pipeline) => {
                info!(
                    path = %path.display(),
                    classes = pipeline.classes().len(),
                    probabilities = pipeline.classifier.supports_probabilities(),
                    "model loaded"
                );
                Self::with_pipeline(pipeline)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "model failed to load");
                Self::without_model()
            }
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.scorer.is_some()
    }

    pub fn scorer(&self) -> Option<&dyn Scorer> {
        self.scorer.as_deref()
    }
}

/// Build the router with permissive CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/health", get(routes::health))
        .route("/predict", post(routes::predict))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, model_loaded = state.model_loaded(), "serving medicine-recommender API");
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
