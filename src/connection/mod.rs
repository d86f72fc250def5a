//! # Printer Connection
//!
//! The connection state machine: device selection, GATT link, writable
//! channel selection, then writes.
//!
//! ## Connecting
//!
//! [`PrinterConnection::connect`] runs the three setup steps in order. Each
//! step returns a `Result`; the chain stops at the first error, which moves
//! the connection to [`ConnectionState::Failed`]. Setup failures are
//! expected (printer off, out of range), so `connect()` never returns an
//! error: callers check [`is_ready`](PrinterConnection::is_ready),
//! [`last_error`](PrinterConnection::last_error) and
//! [`log_messages`](PrinterConnection::log_messages) instead.
//!
//! ## Writing
//!
//! [`PrinterConnection::write`] sends one payload as one GATT write. Unlike
//! `connect()`, write failures are returned to the caller (and recorded).
//!
//! ## Exclusive Access
//!
//! Both operations take `&mut self`, so two `connect()` calls (or a write
//! during a connect) cannot overlap on one connection. Callers sharing a
//! connection across tasks put it behind a `tokio::sync::Mutex`, as the
//! HTTP server does.
//!
//! ## Example
//!
//! ```
//! use vozy::connection::{ConnectOptions, PrinterConnection};
//! use vozy::transport::{Capabilities, MockCharacteristic, MockDevice, MockPlatform, MockService};
//! use uuid::Uuid;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let platform = MockPlatform::new().with_device(
//!     MockDevice::new("VOZY-P50").with_service(
//!         MockService::new(Uuid::from_u128(0x18f0)).with_characteristic(
//!             MockCharacteristic::new(Uuid::from_u128(0x2af1), Capabilities::write()),
//!         ),
//!     ),
//! );
//!
//! let mut printer = PrinterConnection::new(platform, ConnectOptions::default());
//! printer.connect().await;
//! assert!(printer.is_ready());
//! printer.write(&[0x1B, 0x40]).await.unwrap();
//! # }
//! ```

mod diagnostics;
mod link;
mod scanner;
mod selector;
mod state;

pub use diagnostics::DiagnosticsLog;
pub use link::open_link;
pub use scanner::select_writable_channel;
pub use selector::select_device;
pub use state::{ConnectionState, StateSnapshot};

use std::time::Duration;

use uuid::Uuid;

use crate::error::VozyError;
use crate::transport::bluetooth::DEFAULT_SCAN_TIMEOUT_SECS;
use crate::transport::platform::{
    ChannelOf, Characteristic, DeviceFilter, DeviceOf, LinkOf, Platform, DEFAULT_NAME_PREFIX,
};

/// State type of a connection over platform `P`.
pub type StateOf<P> = ConnectionState<DeviceOf<P>, LinkOf<P>, ChannelOf<P>>;

/// Snapshot type of a connection over platform `P`.
pub type SnapshotOf<P> = StateSnapshot<DeviceOf<P>, LinkOf<P>, ChannelOf<P>>;

/// Connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Advertised name prefix to look for
    pub name_prefix: String,
    /// Extra services to request access to
    pub optional_services: Vec<Uuid>,
    /// Discovery window (used by scanning backends)
    pub scan_timeout: Duration,
}

impl ConnectOptions {
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn filter(&self) -> DeviceFilter {
        DeviceFilter::new(self.name_prefix.clone())
            .with_optional_services(self.optional_services.iter().copied())
    }
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            optional_services: Vec::new(),
            scan_timeout: Duration::from_secs(DEFAULT_SCAN_TIMEOUT_SECS),
        }
    }
}

/// # Printer Connection
///
/// Owns the platform, the connection state, the diagnostic log and the
/// last error message.
pub struct PrinterConnection<P: Platform> {
    platform: P,
    options: ConnectOptions,
    state: StateOf<P>,
    log: DiagnosticsLog,
    last_error: Option<String>,
}

impl<P: Platform> PrinterConnection<P> {
    pub fn new(platform: P, options: ConnectOptions) -> Self {
        Self {
            platform,
            options,
            state: ConnectionState::Idle,
            log: DiagnosticsLog::new(),
            last_error: None,
        }
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    /// Run device selection, link establishment and channel selection.
    ///
    /// Clears the log and last error first. Any step failure is recorded and
    /// leaves the connection in [`ConnectionState::Failed`]; nothing is
    /// returned to the caller. A previous link is not torn down, its handles
    /// are simply dropped.
    pub async fn connect(&mut self) {
        self.log.clear();
        self.last_error = None;

        if let Err(e) = self.establish().await {
            self.state = std::mem::take(&mut self.state).into_failed();
            self.record_error(&e);
            self.log.push(format!("Connection error: {}", e));
            tracing::warn!(error = %e, "Printer connection failed");
        }
    }

    async fn establish(&mut self) -> Result<(), VozyError> {
        let filter = self.options.filter();

        self.transition(ConnectionState::Discovering);
        let device = select_device(&self.platform, &filter, &mut self.log).await?;

        self.transition(ConnectionState::Connecting {
            device: device.clone(),
        });
        let link = open_link(&device, &mut self.log).await?;

        self.transition(ConnectionState::ScanningChannels {
            device: device.clone(),
            link: link.clone(),
        });
        let channel = select_writable_channel(&link, &mut self.log).await?;

        self.transition(ConnectionState::Ready {
            device,
            link,
            channel,
        });
        self.log.push("Printer ready for writing");
        Ok(())
    }

    fn transition(&mut self, next: StateOf<P>) {
        tracing::info!(from = self.state.name(), to = next.name(), "Connection state");
        self.state = next;
    }

    fn record_error(&mut self, error: &VozyError) {
        self.last_error = Some(error.to_string());
    }

    /// Send `payload` to the printer as a single GATT write.
    ///
    /// ## Errors
    ///
    /// - [`VozyError::NotReady`]: no channel selected; nothing is sent
    /// - [`VozyError::WriteFailure`]: the platform rejected the write; also
    ///   recorded as the last error
    pub async fn write(&mut self, payload: &[u8]) -> Result<(), VozyError> {
        let Some(channel) = self.state.channel() else {
            self.log
                .push("Printer not ready or writable characteristic missing");
            return Err(VozyError::NotReady);
        };

        let mode = channel.capabilities().preferred_write_mode();
        self.log
            .push(format!("Writing to characteristic: {}", channel.id()));
        tracing::debug!(bytes = payload.len(), ?mode, "Writing payload");

        match channel.write_bytes(payload, mode).await {
            Ok(()) => {
                self.log.push("Write successful");
                Ok(())
            }
            Err(e) => {
                let error = VozyError::WriteFailure(e.to_string());
                self.record_error(&error);
                self.log.push(format!("Write error: {}", e));
                Err(error)
            }
        }
    }

    pub fn state(&self) -> &StateOf<P> {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Diagnostic trace of the current (or last) connection attempt.
    pub fn log_messages(&self) -> &[String] {
        self.log.entries()
    }

    /// Owned copy of the observable state.
    pub fn snapshot(&self) -> SnapshotOf<P> {
        StateSnapshot {
            device: self.state.device().cloned(),
            link: self.state.link().cloned(),
            channel: self.state.channel().cloned(),
            ready: self.state.is_ready(),
            last_error: self.last_error.clone(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
