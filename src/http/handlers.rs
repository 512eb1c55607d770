//! Probe and runtime configuration handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::ConfigVariables;

/// Liveness, readiness and legacy health probes.
pub async fn handle_ok() -> &'static str {
    "ok"
}

/// Serve the configured environment variables as a flat JSON object.
pub async fn handle_config(State(variables): State<Arc<ConfigVariables>>) -> Response {
    match variables.to_json() {
        Ok(raw) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            raw,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Cannot encode configuration variables");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
