//! # Vozy - Bluetooth LE Receipt Printer Library
//!
//! Vozy finds a VOZY thermal receipt printer over Bluetooth Low Energy,
//! works out which GATT characteristic accepts print data, and sends it
//! encoded receipts. It provides:
//!
//! - **Connection state machine**: discovery, link, channel selection, writes
//! - **Transport**: `btleplug` backend and a scripted mock
//! - **Receipt encoding**: layouts → IR → ESC/POS or StarPRNT bytes
//! - **Bill lookup**: fetch and parse utility bills for printing
//! - **HTTP server**: lookup proxy and print endpoints
//!
//! ## Quick Start
//!
//! ```no_run
//! use vozy::{
//!     connection::{ConnectOptions, PrinterConnection},
//!     receipt::{EncoderConfig, QueueTicket, Receipt},
//!     transport::BtleplugPlatform,
//! };
//!
//! # async fn example() -> Result<(), vozy::VozyError> {
//! let platform = BtleplugPlatform::new().await;
//! let mut printer = PrinterConnection::new(platform, ConnectOptions::default());
//!
//! printer.connect().await;
//! for line in printer.log_messages() {
//!     println!("{}", line);
//! }
//!
//! let ticket = Receipt::new(QueueTicket::new("PEDIATRICS", 42), EncoderConfig::default());
//! printer.write(&ticket.encode()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`connection`] | Connection state machine and its steps |
//! | [`transport`] | Bluetooth platform boundary and backends |
//! | [`receipt`] | Layouts and the encoding pipeline |
//! | [`ir`] | Printer command IR, optimizer and codegen |
//! | [`protocol`] | ESC/POS and StarPRNT command builders |
//! | [`printer`] | Printer model presets |
//! | [`lookup`] | Bill lookup |
//! | [`server`] | HTTP server |
//! | [`error`] | Error types |

pub mod connection;
pub mod error;
pub mod ir;
pub mod lookup;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use connection::{ConnectOptions, PrinterConnection};
pub use error::VozyError;
pub use printer::PrinterConfig;
