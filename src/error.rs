//! # Error Types
//!
//! This module defines error types used throughout the vozy library.
//!
//! The first seven variants of [`VozyError`] are the connection taxonomy.
//! Failures raised while connecting never escape
//! [`PrinterConnection::connect`](crate::connection::PrinterConnection::connect);
//! they are recorded and observable through the connection state instead.
//! Write failures are recorded *and* returned.

use thiserror::Error;

/// Main error type for vozy operations
#[derive(Debug, Error)]
pub enum VozyError {
    /// The host has no Bluetooth discovery facility (no adapter, no stack)
    #[error("Bluetooth is not available on this platform")]
    PlatformUnsupported,

    /// Discovery finished without yielding a device
    #[error("No printer selected")]
    NoDeviceSelected,

    /// The selected device does not advertise GATT support
    #[error("Device does not support GATT")]
    LinkUnsupported,

    /// The platform rejected discovery, link or enumeration requests
    #[error("Connection failed: {0}")]
    ConnectionFailure(String),

    /// No characteristic on the device accepts writes
    #[error("No writable characteristic found")]
    NoWritableChannel,

    /// A write was attempted before the connection became ready
    #[error("Printer not ready")]
    NotReady,

    /// The platform rejected a write on the selected characteristic
    #[error("Write failed: {0}")]
    WriteFailure(String),

    /// A connection attempt finished without a writable channel; carries
    /// the recorded reason
    #[error("Printer unavailable: {0}")]
    PrinterUnavailable(String),

    /// Bill lookup errors (upstream request or parsing)
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for VozyError {
    fn from(err: reqwest::Error) -> Self {
        VozyError::Lookup(err.to_string())
    }
}
