//! Queue ticket handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::receipt::{EncoderConfig, QueueTicket, Receipt};
use crate::transport::Platform;

use super::super::state::AppState;
use super::{encoder_config, error_response, print_payload};

/// Request body for printing a queue ticket.
#[derive(Debug, Deserialize)]
pub struct QueueRequest {
    pub department: String,
    pub number: u32,
    /// Encoder options; server defaults when absent
    #[serde(default)]
    pub encoder: Option<EncoderConfig>,
}

/// POST /api/queue/print - Print a queue ticket.
pub async fn print<P: Platform>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<QueueRequest>,
) -> Response {
    let department = req.department.trim();
    if department.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Department cannot be empty");
    }
    let config = match encoder_config(&state, req.encoder) {
        Ok(config) => config,
        Err(response) => return response,
    };

    let payload = Receipt::new(QueueTicket::new(department, req.number), config).encode();
    tracing::info!(department, number = req.number, "printing queue ticket");
    print_payload(&state, payload).await
}
