//! The HTTP service.
//!
//! Routes:
//! - `GET /api/v1/similar` runs a similarity search from query string parameters.
//! - `GET /health` reports liveness.

mod error;
mod handlers;

use std::{future, io, sync::Arc};

use axum::{Router, routing::get};
use doublon_engine::{Detector, DetectorSettings};
use doublon_store::CandidateStore;
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use self::error::{AppError, AppResult};

/// Path of the similarity search endpoint.
pub const SIMILAR_PATH: &str = "/api/v1/similar";

/// Path of the liveness endpoint.
pub const HEALTH_PATH: &str = "/health";

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Search engine bound to the configured store.
    pub detector: Detector<Arc<dyn CandidateStore>>,
}

impl AppState {
    /// Creates state searching `store` with `settings`.
    pub fn new(store: Arc<dyn CandidateStore>, settings: DetectorSettings) -> Self {
        Self {
            detector: Detector::with_settings(store, settings),
        }
    }
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SIMILAR_PATH, get(handlers::similar))
        .route(HEALTH_PATH, get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener for `host` and `port`.
///
/// `host` may be a name such as `localhost` or a bare IPv4/IPv6 address; names resolve to
/// every address they map to and the first one that binds wins.
pub async fn bind(host: &str, port: u16) -> io::Result<TcpListener> {
    TcpListener::bind((host.trim_matches(['[', ']']), port)).await
}

/// Serves `state` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> io::Result<()> {
    info!(
        addr = %listener.local_addr()?,
        store = %state.detector.store().describe(),
        "listening"
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C, or never if the signal cannot be watched.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal, stop the process to exit");
        future::pending::<()>().await;
    }
}
