//! # Mock Transport
//!
//! Scripted in-memory peripherals implementing the platform traits.
//!
//! Used by the test suites and by `vozy --mock` dry runs. Every write that
//! reaches a mock characteristic is recorded in a log shared by the whole
//! device, and link attempts are counted, so tests can assert exactly which
//! platform calls were made.
//!
//! ## Example
//!
//! ```
//! use vozy::transport::{Capabilities, MockCharacteristic, MockDevice, MockPlatform, MockService};
//! use uuid::Uuid;
//!
//! let device = MockDevice::new("VOZY-P50").with_service(
//!     MockService::new(Uuid::from_u128(0x18f0))
//!         .with_characteristic(MockCharacteristic::new(Uuid::from_u128(0x2af1), Capabilities::write())),
//! );
//! let writes = device.write_log();
//! let platform = MockPlatform::new().with_device(device);
//! # let _ = (writes, platform);
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use super::platform::{
    Capabilities, Characteristic, Device, DeviceFilter, Link, Platform, PlatformError,
    ServiceGroup, WriteMode,
};

/// One recorded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub characteristic: Uuid,
    pub payload: Vec<u8>,
    pub mode: WriteMode,
}

/// Shared, cloneable log of writes made against a mock device.
#[derive(Debug, Clone, Default)]
pub struct WriteLog(Arc<Mutex<Vec<WriteRecord>>>);

impl WriteLog {
    fn record(&self, record: WriteRecord) {
        // A poisoned lock only happens if a test already panicked.
        if let Ok(mut records) = self.0.lock() {
            records.push(record);
        }
    }

    /// All writes so far, oldest first.
    pub fn records(&self) -> Vec<WriteRecord> {
        self.0.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scripted discovery facility.
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    devices: Vec<MockDevice>,
    unsupported: bool,
    discovery_error: Option<String>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host without any Bluetooth stack.
    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Default::default()
        }
    }

    /// Add a device that discovery can find.
    pub fn with_device(mut self, device: MockDevice) -> Self {
        self.devices.push(device);
        self
    }

    /// Make discovery fail with a platform error.
    pub fn failing_discovery(mut self, message: impl Into<String>) -> Self {
        self.discovery_error = Some(message.into());
        self
    }
}

#[async_trait]
impl Platform for MockPlatform {
    type Device = MockDevice;

    async fn request_device(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Option<MockDevice>, PlatformError> {
        if self.unsupported {
            return Err(PlatformError::Unsupported);
        }
        if let Some(message) = &self.discovery_error {
            return Err(PlatformError::Failure(message.clone()));
        }
        Ok(self
            .devices
            .iter()
            .find(|d| filter.matches(Some(&d.name)))
            .cloned())
    }
}

/// Printer service UUID advertised by most 58mm BLE receipt printers.
pub const PRINTER_SERVICE: Uuid = Uuid::from_u128(0x000018f0_0000_1000_8000_00805f9b34fb);

/// Notification characteristic of [`PRINTER_SERVICE`].
pub const PRINTER_STATUS_CHARACTERISTIC: Uuid =
    Uuid::from_u128(0x00002af0_0000_1000_8000_00805f9b34fb);

/// Write characteristic of [`PRINTER_SERVICE`].
pub const PRINTER_WRITE_CHARACTERISTIC: Uuid =
    Uuid::from_u128(0x00002af1_0000_1000_8000_00805f9b34fb);

/// Scripted peripheral.
#[derive(Debug, Clone)]
pub struct MockDevice {
    name: String,
    gatt: Arc<AtomicBool>,
    services: Vec<MockService>,
    connect_error: Option<String>,
    enumeration_error: Option<String>,
    link_attempts: Arc<AtomicUsize>,
    writes: WriteLog,
}

impl MockDevice {
    /// A GATT-capable device with no services.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gatt: Arc::new(AtomicBool::new(true)),
            services: Vec::new(),
            connect_error: None,
            enumeration_error: None,
            link_attempts: Arc::new(AtomicUsize::new(0)),
            writes: WriteLog::default(),
        }
    }

    /// A printer laid out like the common 58mm models: one service with a
    /// notify-only status characteristic followed by a writable one.
    pub fn demo_printer(name: impl Into<String>) -> Self {
        Self::new(name).with_service(
            MockService::new(PRINTER_SERVICE)
                .with_characteristic(MockCharacteristic::new(
                    PRINTER_STATUS_CHARACTERISTIC,
                    Capabilities::read_notify(),
                ))
                .with_characteristic(MockCharacteristic::new(
                    PRINTER_WRITE_CHARACTERISTIC,
                    Capabilities::write_without_response(),
                )),
        )
    }

    /// Mark the device as lacking a GATT server.
    pub fn without_gatt(self) -> Self {
        self.set_gatt(false);
        self
    }

    /// Toggle GATT support. Clones of this device see the change.
    pub fn set_gatt(&self, supported: bool) {
        self.gatt.store(supported, Ordering::SeqCst);
    }

    /// Append a service. Its characteristics share this device's write log.
    pub fn with_service(mut self, mut service: MockService) -> Self {
        for characteristic in &mut service.characteristics {
            characteristic.writes = self.writes.clone();
        }
        self.services.push(service);
        self
    }

    /// Make `open_link` fail with a platform error.
    pub fn failing_connect(mut self, message: impl Into<String>) -> Self {
        self.connect_error = Some(message.into());
        self
    }

    /// Make service enumeration fail with a platform error.
    pub fn failing_enumeration(mut self, message: impl Into<String>) -> Self {
        self.enumeration_error = Some(message.into());
        self
    }

    /// Handle to the writes recorded on any of this device's characteristics.
    pub fn write_log(&self) -> WriteLog {
        self.writes.clone()
    }

    /// Number of times `open_link` was called.
    pub fn link_attempts(&self) -> usize {
        self.link_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Device for MockDevice {
    type Link = MockLink;

    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn supports_link(&self) -> bool {
        self.gatt.load(Ordering::SeqCst)
    }

    async fn open_link(&self) -> Result<MockLink, PlatformError> {
        self.link_attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.connect_error {
            return Err(PlatformError::Failure(message.clone()));
        }
        Ok(MockLink {
            services: self.services.clone(),
            enumeration_error: self.enumeration_error.clone(),
        })
    }
}

/// Open link to a mock device.
#[derive(Debug, Clone)]
pub struct MockLink {
    services: Vec<MockService>,
    enumeration_error: Option<String>,
}

#[async_trait]
impl Link for MockLink {
    type Service = MockService;

    async fn service_groups(&self) -> Result<Vec<MockService>, PlatformError> {
        match &self.enumeration_error {
            Some(message) => Err(PlatformError::Failure(message.clone())),
            None => Ok(self.services.clone()),
        }
    }
}

/// Scripted service.
#[derive(Debug, Clone)]
pub struct MockService {
    id: Uuid,
    characteristics: Vec<MockCharacteristic>,
}

impl MockService {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            characteristics: Vec::new(),
        }
    }

    pub fn with_characteristic(mut self, characteristic: MockCharacteristic) -> Self {
        self.characteristics.push(characteristic);
        self
    }
}

#[async_trait]
impl ServiceGroup for MockService {
    type Characteristic = MockCharacteristic;

    fn id(&self) -> Uuid {
        self.id
    }

    async fn characteristics(&self) -> Result<Vec<MockCharacteristic>, PlatformError> {
        Ok(self.characteristics.clone())
    }
}

/// Scripted characteristic.
#[derive(Debug, Clone)]
pub struct MockCharacteristic {
    id: Uuid,
    capabilities: Capabilities,
    write_error: Option<String>,
    writes: WriteLog,
}

impl MockCharacteristic {
    pub fn new(id: Uuid, capabilities: Capabilities) -> Self {
        Self {
            id,
            capabilities,
            write_error: None,
            writes: WriteLog::default(),
        }
    }

    /// Make every write fail with a platform error (the attempt is still
    /// recorded).
    pub fn failing_writes(mut self, message: impl Into<String>) -> Self {
        self.write_error = Some(message.into());
        self
    }
}

#[async_trait]
impl Characteristic for MockCharacteristic {
    fn id(&self) -> Uuid {
        self.id
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    async fn write_bytes(&self, payload: &[u8], mode: WriteMode) -> Result<(), PlatformError> {
        self.writes.record(WriteRecord {
            characteristic: self.id,
            payload: payload.to_vec(),
            mode,
        });
        match &self.write_error {
            Some(message) => Err(PlatformError::Failure(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer() -> MockDevice {
        MockDevice::new("VOZY-P50").with_service(
            MockService::new(Uuid::from_u128(0x18f0)).with_characteristic(
                MockCharacteristic::new(Uuid::from_u128(0x2af1), Capabilities::write()),
            ),
        )
    }

    #[tokio::test]
    async fn test_request_device_by_prefix() {
        let platform = MockPlatform::new()
            .with_device(MockDevice::new("MPT-II"))
            .with_device(printer());

        let found = platform
            .request_device(&DeviceFilter::default())
            .await
            .unwrap();
        assert_eq!(found.unwrap().name().as_deref(), Some("VOZY-P50"));

        let none = platform
            .request_device(&DeviceFilter::new("EPSON"))
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_unsupported_platform() {
        let err = MockPlatform::unsupported()
            .request_device(&DeviceFilter::default())
            .await
            .unwrap_err();
        assert_eq!(err, PlatformError::Unsupported);
    }

    #[tokio::test]
    async fn test_writes_share_device_log() {
        let device = printer();
        let log = device.write_log();

        let link = device.open_link().await.unwrap();
        let services = link.service_groups().await.unwrap();
        let chars = services[0].characteristics().await.unwrap();
        chars[0]
            .write_bytes(&[0x1B, 0x40], WriteMode::WithResponse)
            .await
            .unwrap();

        assert_eq!(device.link_attempts(), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].payload, vec![0x1B, 0x40]);
        assert_eq!(log.records()[0].characteristic, Uuid::from_u128(0x2af1));
    }

    #[tokio::test]
    async fn test_failing_write_is_recorded() {
        let ch = MockCharacteristic::new(Uuid::from_u128(1), Capabilities::write())
            .failing_writes("GATT Server is disconnected");
        let log = ch.writes.clone();
        let err = ch
            .write_bytes(b"x", WriteMode::WithResponse)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "GATT Server is disconnected");
        assert_eq!(log.len(), 1);
    }
}
