//! # Bluetooth LE Transport (btleplug)
//!
//! Real-hardware backend for the platform traits, built on `btleplug`.
//! Works with BlueZ on Linux, CoreBluetooth on macOS and WinRT on Windows.
//!
//! ## Discovery
//!
//! There is no chooser dialog on a native host, so `request_device` scans
//! for a fixed window and picks the first peripheral whose advertised name
//! starts with the filter prefix:
//!
//! ```bash
//! # Linux: make sure the adapter is powered
//! $ bluetoothctl power on
//! # The printer must be advertising (not bonded to a phone)
//! $ vozy connect --prefix VOZY
//! ```
//!
//! ## Service Order
//!
//! btleplug reports services and characteristics as ordered sets (by UUID).
//! That order is what the channel scanner sees as "platform order".

use std::time::Duration;

use async_trait::async_trait;
use btleplug::api::{
    Central, CharPropFlags, Characteristic as GattCharacteristic, Manager as _,
    Peripheral as _, ScanFilter, Service, WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use tokio::time::{Instant, sleep};
use uuid::Uuid;

use super::platform::{
    Capabilities, Characteristic, Device, DeviceFilter, Link, Platform, PlatformError,
    ServiceGroup, WriteMode,
};

/// Default scan window (seconds)
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 10;

/// Interval between peripheral list polls during a scan
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// # btleplug Platform
///
/// Wraps the first Bluetooth adapter of the host. A host without an adapter
/// still constructs successfully; discovery then reports
/// [`PlatformError::Unsupported`].
///
/// ## Example
///
/// ```no_run
/// use vozy::connection::{ConnectOptions, PrinterConnection};
/// use vozy::transport::BtleplugPlatform;
///
/// # async fn example() -> Result<(), vozy::VozyError> {
/// let platform = BtleplugPlatform::new().await;
/// let mut printer = PrinterConnection::new(platform, ConnectOptions::default());
/// printer.connect().await;
/// if printer.is_ready() {
///     printer.write(b"hello\n").await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BtleplugPlatform {
    adapter: Option<Adapter>,
    scan_timeout: Duration,
}

impl BtleplugPlatform {
    /// Open the first adapter of the host.
    pub async fn new() -> Self {
        let adapter = match first_adapter().await {
            Ok(adapter) => adapter,
            Err(e) => {
                tracing::warn!(error = %e, "Bluetooth manager unavailable");
                None
            }
        };
        if adapter.is_none() {
            tracing::warn!("No Bluetooth adapter found");
        }
        Self {
            adapter,
            scan_timeout: Duration::from_secs(DEFAULT_SCAN_TIMEOUT_SECS),
        }
    }

    /// Set the scan window used by discovery.
    pub fn with_scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    pub fn scan_timeout(&self) -> Duration {
        self.scan_timeout
    }
}

async fn first_adapter() -> Result<Option<Adapter>, btleplug::Error> {
    let manager = Manager::new().await?;
    let adapters = manager.adapters().await?;
    Ok(adapters.into_iter().next())
}

#[async_trait]
impl Platform for BtleplugPlatform {
    type Device = BtleDevice;

    async fn request_device(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Option<BtleDevice>, PlatformError> {
        let adapter = self.adapter.as_ref().ok_or(PlatformError::Unsupported)?;

        // Native stacks expose every service once connected, so optional
        // services need no permission grant here.
        tracing::debug!(
            prefix = %filter.name_prefix,
            optional_services = filter.optional_services.len(),
            timeout_secs = self.scan_timeout.as_secs(),
            "Starting BLE scan"
        );
        adapter.start_scan(ScanFilter::default()).await?;

        let found = poll_until(adapter, filter, self.scan_timeout).await;
        finish_scan(found, adapter.stop_scan()).await
    }
}

/// Run `stop`, then report the poll outcome. The scan is stopped on every
/// path; a poll error wins over a stop error.
async fn finish_scan<T>(
    found: Result<T, PlatformError>,
    stop: impl Future<Output = Result<(), btleplug::Error>>,
) -> Result<T, PlatformError> {
    let stopped = stop.await;
    let found = found?;
    stopped?;
    Ok(found)
}

/// Poll the adapter's peripheral list until a match or `timeout`.
async fn poll_until(
    adapter: &Adapter,
    filter: &DeviceFilter,
    timeout: Duration,
) -> Result<Option<BtleDevice>, PlatformError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(device) = find_matching(adapter, filter).await? {
            return Ok(Some(device));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        sleep(POLL_INTERVAL).await;
    }
}

async fn find_matching(
    adapter: &Adapter,
    filter: &DeviceFilter,
) -> Result<Option<BtleDevice>, PlatformError> {
    for peripheral in adapter.peripherals().await? {
        let Some(properties) = peripheral.properties().await? else {
            continue;
        };
        if filter.matches(properties.local_name.as_deref()) {
            return Ok(Some(BtleDevice {
                name: properties.local_name,
                peripheral,
            }));
        }
    }
    Ok(None)
}

/// A discovered peripheral.
#[derive(Debug, Clone)]
pub struct BtleDevice {
    name: Option<String>,
    peripheral: Peripheral,
}

#[async_trait]
impl Device for BtleDevice {
    type Link = BtleLink;

    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    /// Every LE peripheral btleplug reports is GATT-capable.
    fn supports_link(&self) -> bool {
        true
    }

    async fn open_link(&self) -> Result<BtleLink, PlatformError> {
        if !self.peripheral.is_connected().await? {
            self.peripheral.connect().await?;
        }
        self.peripheral.discover_services().await?;
        Ok(BtleLink {
            peripheral: self.peripheral.clone(),
        })
    }
}

/// A connected peripheral with discovered services.
#[derive(Debug, Clone)]
pub struct BtleLink {
    peripheral: Peripheral,
}

#[async_trait]
impl Link for BtleLink {
    type Service = BtleService;

    async fn service_groups(&self) -> Result<Vec<BtleService>, PlatformError> {
        Ok(self
            .peripheral
            .services()
            .into_iter()
            .filter(|service| service.primary)
            .map(|service| BtleService {
                service,
                peripheral: self.peripheral.clone(),
            })
            .collect())
    }
}

/// A primary service of a connected peripheral.
#[derive(Debug, Clone)]
pub struct BtleService {
    service: Service,
    peripheral: Peripheral,
}

#[async_trait]
impl ServiceGroup for BtleService {
    type Characteristic = BtleCharacteristic;

    fn id(&self) -> Uuid {
        self.service.uuid
    }

    async fn characteristics(&self) -> Result<Vec<BtleCharacteristic>, PlatformError> {
        Ok(self
            .service
            .characteristics
            .iter()
            .cloned()
            .map(|characteristic| BtleCharacteristic {
                characteristic,
                peripheral: self.peripheral.clone(),
            })
            .collect())
    }
}

/// A characteristic of a connected peripheral.
#[derive(Debug, Clone)]
pub struct BtleCharacteristic {
    characteristic: GattCharacteristic,
    peripheral: Peripheral,
}

#[async_trait]
impl Characteristic for BtleCharacteristic {
    fn id(&self) -> Uuid {
        self.characteristic.uuid
    }

    fn capabilities(&self) -> Capabilities {
        capabilities_from_flags(self.characteristic.properties)
    }

    async fn write_bytes(&self, payload: &[u8], mode: WriteMode) -> Result<(), PlatformError> {
        let write_type = match mode {
            WriteMode::WithResponse => WriteType::WithResponse,
            WriteMode::WithoutResponse => WriteType::WithoutResponse,
        };
        self.peripheral
            .write(&self.characteristic, payload, write_type)
            .await?;
        Ok(())
    }
}

/// Map the GATT properties byte to [`Capabilities`].
fn capabilities_from_flags(flags: CharPropFlags) -> Capabilities {
    Capabilities {
        broadcast: flags.contains(CharPropFlags::BROADCAST),
        read: flags.contains(CharPropFlags::READ),
        write_without_response: flags.contains(CharPropFlags::WRITE_WITHOUT_RESPONSE),
        write: flags.contains(CharPropFlags::WRITE),
        notify: flags.contains(CharPropFlags::NOTIFY),
        indicate: flags.contains(CharPropFlags::INDICATE),
    }
}

// ============================================================================
// TESTS
// ============================================================================
