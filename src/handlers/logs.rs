use axum::http::{header, HeaderName, StatusCode};
use axum::extract::State;
use std::sync::Arc;
use tracing::error;

use crate::state::ServerState;

/// Download the acceleration log as CSV.
pub async fn download_acceleration_log(
    State(state): State<Arc<ServerState>>,
) -> Result<(StatusCode, [(HeaderName, &'static str); 1], Vec<u8>), (StatusCode, String)> {
    let path = state.accel_log.path();
    if !path.exists() {
        return Err((
            StatusCode::NOT_FOUND,
            "Acceleration log has not been written yet".to_string(),
        ));
    }

    let data = tokio::fs::read(path).await.map_err(|e| {
        error!("failed to read acceleration log: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to read acceleration log".to_string(),
        )
    })?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], data))
}
