//! Server state and configuration.

use tokio::sync::Mutex;

use crate::connection::PrinterConnection;
use crate::lookup::DEFAULT_UPSTREAM;
use crate::receipt::EncoderConfig;
use crate::transport::Platform;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Bill search endpoint queried by `/api/bill`
    pub bill_upstream: String,
    /// Encoder options used when a print request carries none
    pub encoder: EncoderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            bill_upstream: DEFAULT_UPSTREAM.to_string(),
            encoder: EncoderConfig::default(),
        }
    }
}

/// Application state shared across handlers.
///
/// The printer connection sits behind an async mutex: a connect attempt and
/// a print job never interleave.
pub struct AppState<P: Platform> {
    pub config: ServerConfig,
    pub printer: Mutex<PrinterConnection<P>>,
    pub http: reqwest::Client,
}

impl<P: Platform> AppState<P> {
    pub fn new(config: ServerConfig, printer: PrinterConnection<P>) -> Self {
        Self {
            config,
            printer: Mutex::new(printer),
            http: reqwest::Client::new(),
        }
    }
}
