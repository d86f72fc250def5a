//! # Platform Traits
//!
//! Abstract Bluetooth LE surface consumed by the connection steps.
//!
//! Every handle type is `Clone`: backends hand out cheap reference-counted
//! handles (btleplug peripherals are `Arc`-backed), so the connection can
//! keep one copy in its state and give clones to observers.

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Default advertised-name prefix of VOZY printers.
pub const DEFAULT_NAME_PREFIX: &str = "VOZY";

/// Errors reported by a platform backend.
///
/// Connection steps translate these into the [`VozyError`](crate::VozyError)
/// taxonomy; the message is carried through verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The discovery facility does not exist on this host
    #[error("Bluetooth is not available on this platform")]
    Unsupported,

    /// Any other platform failure
    #[error("{0}")]
    Failure(String),
}

impl From<btleplug::Error> for PlatformError {
    fn from(err: btleplug::Error) -> Self {
        PlatformError::Failure(err.to_string())
    }
}

/// Device discovery filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFilter {
    /// Advertised local name must start with this prefix
    pub name_prefix: String,
    /// Services the caller wants access to beyond those advertised
    pub optional_services: Vec<Uuid>,
}

impl DeviceFilter {
    pub fn new(name_prefix: impl Into<String>) -> Self {
        Self {
            name_prefix: name_prefix.into(),
            optional_services: Vec::new(),
        }
    }

    pub fn with_optional_services(mut self, services: impl IntoIterator<Item = Uuid>) -> Self {
        self.optional_services.extend(services);
        self
    }

    /// Whether an advertised name passes the filter.
    ///
    /// Devices that advertise no name never match.
    pub fn matches(&self, name: Option<&str>) -> bool {
        name.is_some_and(|n| n.starts_with(&self.name_prefix))
    }
}

impl Default for DeviceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_PREFIX)
    }
}

/// Characteristic capability set (the GATT properties byte).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub broadcast: bool,
    pub read: bool,
    pub write_without_response: bool,
    pub write: bool,
    pub notify: bool,
    pub indicate: bool,
}

impl Capabilities {
    /// Write-with-response only.
    pub fn write() -> Self {
        Self {
            write: true,
            ..Default::default()
        }
    }

    /// Write-without-response only.
    pub fn write_without_response() -> Self {
        Self {
            write_without_response: true,
            ..Default::default()
        }
    }

    /// Read and notify, no write (typical status characteristic).
    pub fn read_notify() -> Self {
        Self {
            read: true,
            notify: true,
            ..Default::default()
        }
    }

    /// A characteristic is a usable print channel if it accepts either
    /// kind of write.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.write || self.write_without_response
    }

    /// Preferred write mode: acknowledged when available.
    pub fn preferred_write_mode(&self) -> WriteMode {
        if self.write {
            WriteMode::WithResponse
        } else {
            WriteMode::WithoutResponse
        }
    }
}

/// GATT write type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    WithResponse,
    WithoutResponse,
}

/// Device discovery facility.
#[async_trait]
pub trait Platform: Send + Sync {
    type Device: Device;

    /// Discover a device matching `filter`.
    ///
    /// `Ok(None)` means discovery completed without a match.
    async fn request_device(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Option<Self::Device>, PlatformError>;
}

/// A selected peripheral.
#[async_trait]
pub trait Device: Clone + Debug + Send + Sync {
    type Link: Link;

    /// Advertised local name, if any.
    fn name(&self) -> Option<String>;

    /// Whether the device exposes a GATT server.
    fn supports_link(&self) -> bool;

    /// Open the GATT connection.
    async fn open_link(&self) -> Result<Self::Link, PlatformError>;
}

/// An open GATT connection.
#[async_trait]
pub trait Link: Clone + Debug + Send + Sync {
    type Service: ServiceGroup;

    /// Primary services in platform order.
    async fn service_groups(&self) -> Result<Vec<Self::Service>, PlatformError>;
}

/// A GATT service.
#[async_trait]
pub trait ServiceGroup: Clone + Debug + Send + Sync {
    type Characteristic: Characteristic;

    fn id(&self) -> Uuid;

    /// Characteristics in platform order.
    async fn characteristics(&self) -> Result<Vec<Self::Characteristic>, PlatformError>;
}

/// A GATT characteristic.
#[async_trait]
pub trait Characteristic: Clone + Debug + Send + Sync {
    fn id(&self) -> Uuid;

    fn capabilities(&self) -> Capabilities;

    /// Write `payload` as one GATT write.
    async fn write_bytes(&self, payload: &[u8], mode: WriteMode) -> Result<(), PlatformError>;
}

/// Device handle type of a platform.
pub type DeviceOf<P> = <P as Platform>::Device;
/// Link handle type of a platform.
pub type LinkOf<P> = <DeviceOf<P> as Device>::Link;
/// Service group type of a platform.
pub type ServiceOf<P> = <LinkOf<P> as Link>::Service;
/// Channel (characteristic) handle type of a platform.
pub type ChannelOf<P> = <ServiceOf<P> as ServiceGroup>::Characteristic;
