//! # HTTP Server for Bill Lookup and Receipt Printing
//!
//! Exposes the bill lookup proxy and the printer over HTTP so a kiosk page
//! can look up bills and print tickets through one BLE printer.
//!
//! ## Usage
//!
//! ```bash
//! vozy serve --listen 0.0.0.0:8080 --prefix VOZY
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Effect |
//! |--------|------|--------|
//! | GET | `/api/bill?acct_no=..&route_code=..` | Look up a bill (JSON, CORS open) |
//! | POST | `/api/printer/connect` | Run a connection attempt |
//! | GET | `/api/printer/status` | Connection state and diagnostic log |
//! | POST | `/api/queue/print` | Print a queue ticket |
//! | POST | `/api/bill/print` | Print a bill summary |

mod handlers;
mod state;

pub use handlers::printer::PrinterStatus;
pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::connection::PrinterConnection;
use crate::error::VozyError;
use crate::transport::Platform;

/// Build the application router.
pub fn router<P: Platform + 'static>(state: Arc<AppState<P>>) -> Router {
    Router::new()
        // Bill lookup API
        .route("/api/bill", get(handlers::bill::lookup::<P>))
        .route("/api/bill/print", post(handlers::bill::print::<P>))
        // Printer API
        .route("/api/printer/connect", post(handlers::printer::connect::<P>))
        .route("/api/printer/status", get(handlers::printer::status::<P>))
        // Queue API
        .route("/api/queue/print", post(handlers::queue::print::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use vozy::connection::{ConnectOptions, PrinterConnection};
/// use vozy::server::{serve, ServerConfig};
/// use vozy::transport::BtleplugPlatform;
///
/// # async fn example() -> Result<(), vozy::error::VozyError> {
/// let platform = BtleplugPlatform::new().await;
/// let printer = PrinterConnection::new(platform, ConnectOptions::default());
///
/// serve(ServerConfig::default(), printer).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve<P: Platform + 'static>(
    config: ServerConfig,
    printer: PrinterConnection<P>,
) -> Result<(), VozyError> {
    let listen_addr = config.listen_addr.clone();
    let upstream = config.bill_upstream.clone();
    let prefix = printer.options().name_prefix.clone();
    let app = router(Arc::new(AppState::new(config, printer)));

    println!("Vozy HTTP server starting...");
    println!("Listening on: {}", listen_addr);
    println!("Printer name prefix: {}", prefix);
    println!("Bill upstream: {}", upstream);
    println!();

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| VozyError::Server(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| VozyError::Server(e.to_string()))?;

    Ok(())
}
