//! # Server Tests
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot` against a
//! simulated printer and a local stand-in for the bill upstream.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::Query,
    http::{Request, StatusCode, header},
    response::{Html, Response},
    routing::get,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;
use vozy::connection::{ConnectOptions, PrinterConnection};
use vozy::server::{AppState, ServerConfig, router};
use vozy::transport::{MockDevice, MockPlatform, WriteLog};

const BILL_PAGE: &str = r#"
    <html><body>
    <h1>Invoice</h1>
    <label>Account Number</label>
    <p>0123-4567</p>
    <label>Due Date</label>
    <p>October 25, 2026</p>
    <h3>Kindly Pay</h3>
    <span>₱1,234.50</span>
    <dl>
      <dt>Customer Name</dt><dd>JUAN DELA CRUZ</dd>
    </dl>
    <footer>Thank you!</footer>
    </body></html>
"#;

fn app(upstream: &str) -> (Router, WriteLog) {
    let device = MockDevice::demo_printer("VOZY-MOCK");
    let writes = device.write_log();
    let printer = PrinterConnection::new(
        MockPlatform::new().with_device(device),
        ConnectOptions::default(),
    );
    let config = ServerConfig {
        bill_upstream: upstream.to_string(),
        ..ServerConfig::default()
    };
    (router(Arc::new(AppState::new(config, printer))), writes)
}

/// Serve a fake bill search page on an ephemeral port.
async fn fake_upstream() -> String {
    async fn search(Query(params): Query<HashMap<String, String>>) -> Html<&'static str> {
        let known = params.get("acct_no").map(String::as_str) == Some("0123-4567")
            && params.get("route_code").map(String::as_str) == Some("R12");
        Html(if known { BILL_PAGE } else { "<html>Not found</html>" })
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let upstream = Router::new().route("/bill/search", get(search));
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });
    format!("http://{}/bill/search", addr)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

// ============================================================================
// BILL LOOKUP
// ============================================================================

#[tokio::test]
async fn test_lookup_missing_parameters() {
    let (app, _) = app("http://127.0.0.1:1/bill/search");

    for uri in ["/api/bill", "/api/bill?acct_no=0123-4567", "/api/bill?acct_no=&route_code=R12"] {
        let response = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Missing parameters");
    }
}

#[tokio::test]
async fn test_lookup_unreachable_upstream() {
    let (app, _) = app("http://127.0.0.1:1/bill/search");

    let response = app
        .oneshot(get_request("/api/bill?acct_no=0123-4567&route_code=R12"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Proxy error");
}

#[tokio::test]
async fn test_lookup_found() {
    let upstream = fake_upstream().await;
    let (app, _) = app(&upstream);

    let response = app
        .oneshot(get_request("/api/bill?acct_no=0123-4567&route_code=R12"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["accountNumber"], "0123-4567");
    assert_eq!(json["routeCode"], "R12");
    assert_eq!(json["amount"], "1,234.50");
    assert_eq!(json["dueDate"], "October 25, 2026");
    assert_eq!(json["Customer Name"], "JUAN DELA CRUZ");
}

#[tokio::test]
async fn test_lookup_not_found_is_still_ok() {
    let upstream = fake_upstream().await;
    let (app, _) = app(&upstream);

    let response = app
        .oneshot(get_request("/api/bill?acct_no=9999&route_code=R12"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No bill found or invalid account/route code");
}

// ============================================================================
// PRINTER
// ============================================================================

#[tokio::test]
async fn test_status_before_connect() {
    let (app, _) = app("http://127.0.0.1:1/bill/search");

    let response = app.oneshot(get_request("/api/printer/status")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"], "idle");
    assert_eq!(json["ready"], false);
    assert_eq!(json["log"], json!([]));
}

#[tokio::test]
async fn test_connect_reports_channel() {
    let (app, _) = app("http://127.0.0.1:1/bill/search");

    let response = app
        .clone()
        .oneshot(post_json("/api/printer/connect", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ready"], true);
    assert_eq!(json["device"], "VOZY-MOCK");
    assert_eq!(json["channel"], "00002af1-0000-1000-8000-00805f9b34fb");
    assert_eq!(json["lastError"], Value::Null);

    // Status reflects the same connection
    let status = body_json(app.oneshot(get_request("/api/printer/status")).await.unwrap()).await;
    assert_eq!(status["state"], "ready");
}

// ============================================================================
// PRINTING
// ============================================================================

#[tokio::test]
async fn test_queue_print_before_connect() {
    let (app, writes) = app("http://127.0.0.1:1/bill/search");

    let response = app
        .oneshot(post_json(
            "/api/queue/print",
            json!({"department": "PEDIATRICS", "number": 42}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Printer not ready");
    assert!(writes.is_empty());
}

#[tokio::test]
async fn test_queue_print_after_connect() {
    let (app, writes) = app("http://127.0.0.1:1/bill/search");
    app.clone()
        .oneshot(post_json("/api/printer/connect", json!({})))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/queue/print",
            json!({"department": "PEDIATRICS", "number": 42}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let records = writes.records();
    assert_eq!(records.len(), 1);
    assert_eq!(json["bytes"], records[0].payload.len());
    assert_eq!(&records[0].payload[..6], &[0x1B, 0x40, 0x1B, 0x74, 0x00, 0x0A]);
}

#[tokio::test]
async fn test_queue_print_rejects_bad_input() {
    let (app, writes) = app("http://127.0.0.1:1/bill/search");

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/queue/print",
            json!({"department": "   ", "number": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Department cannot be empty");

    let response = app
        .oneshot(post_json(
            "/api/queue/print",
            json!({"department": "X-RAY", "number": 1, "encoder": {"printerModel": "nope"}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(writes.is_empty());
}

#[tokio::test]
async fn test_bill_print_with_record() {
    let (app, writes) = app("http://127.0.0.1:1/bill/search");
    app.clone()
        .oneshot(post_json("/api/printer/connect", json!({})))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/bill/print",
            json!({
                "record": {"success": true, "accountNumber": "0123-4567", "amount": "1,234.50"},
                "encoder": {"printerModel": "tsp650ii"}
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let records = writes.records();
    assert_eq!(records.len(), 1);
    // StarPRNT prologue
    assert_eq!(
        &records[0].payload[..7],
        &[0x1B, 0x40, 0x1B, 0x1D, 0x74, 0x01, 0x0A]
    );
}

#[tokio::test]
async fn test_bill_print_lookup_failure() {
    let (app, writes) = app("http://127.0.0.1:1/bill/search");

    let response = app
        .oneshot(post_json(
            "/api/bill/print",
            json!({"acct_no": "0123-4567", "route_code": "R12"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["success"], false);
    assert!(writes.is_empty());
}
