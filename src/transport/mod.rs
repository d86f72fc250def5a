//! # Printer Transport Layer
//!
//! This module defines the Bluetooth LE platform boundary and its backends.
//!
//! ## Platform Boundary
//!
//! The connection state machine never talks to a Bluetooth stack directly.
//! It goes through the traits in [`platform`], which mirror the GATT object
//! model:
//!
//! ```text
//! Platform ──request_device──► Device ──open_link──► Link
//!                                                     │
//!                                            service_groups
//!                                                     ▼
//!                    Characteristic ◄──characteristics── ServiceGroup
//! ```
//!
//! ## Available Backends
//!
//! - [`bluetooth`]: real hardware via `btleplug` (BlueZ, CoreBluetooth, WinRT)
//! - [`mock`]: scripted in-memory peripherals for tests and dry runs

pub mod bluetooth;
pub mod mock;
pub mod platform;

pub use bluetooth::BtleplugPlatform;
pub use mock::{
    MockCharacteristic, MockDevice, MockLink, MockPlatform, MockService, WriteLog, WriteRecord,
};
pub use platform::{
    Capabilities, Characteristic, Device, DeviceFilter, Link, Platform, PlatformError,
    ServiceGroup, WriteMode,
};
