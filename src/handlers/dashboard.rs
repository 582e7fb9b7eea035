use axum::{extract::State, http::StatusCode, response::Html};
use std::sync::Arc;
use tracing::{error, warn};

use crate::analysis::{load_series, AnalysisReport};
use crate::render::page;
use crate::state::ServerState;

/// Dashboard endpoint.
///
/// Reloads the voltage file, recomputes every derived view, appends fresh
/// acceleration points to the log, and renders the page. A load failure
/// surfaces as an in-page error with HTTP 500; a log-append failure only
/// degrades to a warning banner.
pub async fn dashboard(State(state): State<Arc<ServerState>>) -> (StatusCode, Html<String>) {
    let series = match load_series(&state.config.data_path) {
        Ok(series) => series,
        Err(err) => {
            error!("failed to load voltage data: {err}");
            return error_page(&state, &err.to_string());
        }
    };

    let report = AnalysisReport::from_series(&series);

    let warning = match state.accel_log.append(&report.accelerations).await {
        Ok(()) => None,
        Err(err) => {
            warn!("failed to append acceleration log: {err}");
            Some(format!("Acceleration log was not updated: {err}"))
        }
    };

    match page::render_dashboard(&state.templates, &series, &report, warning) {
        Ok(html) => (StatusCode::OK, Html(html)),
        Err(err) => {
            error!("failed to render dashboard: {err}");
            error_page(&state, &err.to_string())
        }
    }
}

fn error_page(state: &ServerState, message: &str) -> (StatusCode, Html<String>) {
    let html = page::render_error(&state.templates, message).unwrap_or_else(|err| {
        error!("failed to render error page: {err}");
        format!("<!DOCTYPE html><html><body><h1>Voltage Dashboard</h1><p>{message}</p></body></html>")
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Html(html))
}
