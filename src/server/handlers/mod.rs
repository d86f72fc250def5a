//! HTTP handlers for the server.

pub mod bill;
pub mod printer;
pub mod queue;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::state::AppState;
use crate::error::VozyError;
use crate::receipt::EncoderConfig;
use crate::transport::Platform;

/// Generate error response JSON.
pub(crate) fn error_response(status: StatusCode, error_msg: &str) -> Response {
    (status, Json(json!({"success": false, "error": error_msg}))).into_response()
}

/// Request options, falling back to the server defaults.
pub(crate) fn encoder_config<P: Platform>(
    state: &AppState<P>,
    requested: Option<EncoderConfig>,
) -> Result<EncoderConfig, Response> {
    let config = requested.unwrap_or_else(|| state.config.encoder.clone());
    config
        .validate()
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.to_string()))?;
    Ok(config)
}

/// Send an encoded receipt through the shared connection.
pub(crate) async fn print_payload<P: Platform>(state: &AppState<P>, payload: Vec<u8>) -> Response {
    let mut printer = state.printer.lock().await;
    match printer.write(&payload).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"success": true, "bytes": payload.len()})),
        )
            .into_response(),
        Err(e @ VozyError::NotReady) => error_response(StatusCode::CONFLICT, &e.to_string()),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}
