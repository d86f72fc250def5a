//! Printer connection handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::connection::PrinterConnection;
use crate::transport::{Characteristic, Device, Platform};

use super::super::state::AppState;

/// JSON view of a printer connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterStatus {
    pub state: String,
    pub ready: bool,
    pub device: Option<String>,
    pub channel: Option<String>,
    pub last_error: Option<String>,
    pub log: Vec<String>,
}

impl PrinterStatus {
    pub fn of<P: Platform>(printer: &PrinterConnection<P>) -> Self {
        let state = printer.state();
        Self {
            state: state.name().to_string(),
            ready: printer.is_ready(),
            device: state.device().and_then(|d| d.name()),
            channel: state.channel().map(|c| c.id().to_string()),
            last_error: printer.last_error().map(str::to_string),
            log: printer.log_messages().to_vec(),
        }
    }
}

/// POST /api/printer/connect - Run a connection attempt.
///
/// Always 200; the outcome is in the returned status.
pub async fn connect<P: Platform>(State(state): State<Arc<AppState<P>>>) -> Json<PrinterStatus> {
    let mut printer = state.printer.lock().await;
    printer.connect().await;
    Json(PrinterStatus::of(&printer))
}

/// GET /api/printer/status - Current connection state.
pub async fn status<P: Platform>(State(state): State<Arc<AppState<P>>>) -> Json<PrinterStatus> {
    let printer = state.printer.lock().await;
    Json(PrinterStatus::of(&printer))
}
