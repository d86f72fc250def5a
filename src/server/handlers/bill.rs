//! Bill lookup and bill printing handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::lookup::{BillRecord, fetch_bill};
use crate::receipt::{BillReceipt, EncoderConfig, Receipt};
use crate::transport::Platform;

use super::super::state::AppState;
use super::{encoder_config, error_response, print_payload};

/// Query string of the lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct BillQuery {
    pub acct_no: Option<String>,
    pub route_code: Option<String>,
}

impl BillQuery {
    /// Both parameters, if present and non-empty.
    fn params(&self) -> Option<(&str, &str)> {
        let account = self.acct_no.as_deref().filter(|s| !s.is_empty())?;
        let route = self.route_code.as_deref().filter(|s| !s.is_empty())?;
        Some((account, route))
    }
}

/// GET /api/bill - Proxy a bill lookup.
///
/// Responds 400 "Missing parameters" without both query parameters and
/// 500 "Proxy error" when the upstream cannot be reached.
pub async fn lookup<P: Platform>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<BillQuery>,
) -> Response {
    let Some((account, route)) = query.params() else {
        return (StatusCode::BAD_REQUEST, "Missing parameters").into_response();
    };

    match fetch_bill(&state.http, &state.config.bill_upstream, account, route).await {
        Ok(record) => (
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(record),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "bill lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Proxy error").into_response()
        }
    }
}

/// Request body for printing a bill.
///
/// Either a record from a previous lookup, or the parameters to look one up.
#[derive(Debug, Deserialize)]
pub struct BillPrintRequest {
    #[serde(default)]
    pub record: Option<BillRecord>,
    #[serde(default)]
    pub acct_no: Option<String>,
    #[serde(default)]
    pub route_code: Option<String>,
    #[serde(default)]
    pub encoder: Option<EncoderConfig>,
}

/// POST /api/bill/print - Print a bill summary.
pub async fn print<P: Platform>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<BillPrintRequest>,
) -> Response {
    let config = match encoder_config(&state, req.encoder) {
        Ok(config) => config,
        Err(response) => return response,
    };

    let record = match req.record {
        Some(record) => record,
        None => {
            let query = BillQuery {
                acct_no: req.acct_no,
                route_code: req.route_code,
            };
            let Some((account, route)) = query.params() else {
                return error_response(StatusCode::BAD_REQUEST, "Missing parameters");
            };
            match fetch_bill(&state.http, &state.config.bill_upstream, account, route).await {
                Ok(record) => record,
                Err(e) => return error_response(StatusCode::BAD_GATEWAY, &e.to_string()),
            }
        }
    };

    let payload = Receipt::new(BillReceipt::new(record), config).encode();
    print_payload(&state, payload).await
}
