pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod state;
pub mod storage;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use state::ServerState;

/// Build the application router. Shared by the binary and the tests.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/health", get(handlers::health_check))
        .route("/logs/acceleration.csv", get(handlers::download_acceleration_log))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
