//! Device selection step.

use crate::error::VozyError;
use crate::transport::platform::{Device, DeviceFilter, Platform, PlatformError};

use super::DiagnosticsLog;

/// Ask the platform for a device matching `filter`.
///
/// ## Errors
///
/// - [`VozyError::PlatformUnsupported`]: no discovery facility
/// - [`VozyError::NoDeviceSelected`]: discovery yielded nothing
/// - [`VozyError::ConnectionFailure`]: discovery itself failed
pub async fn select_device<P: Platform>(
    platform: &P,
    filter: &DeviceFilter,
    log: &mut DiagnosticsLog,
) -> Result<P::Device, VozyError> {
    log.push(format!(
        "Requesting Bluetooth device (name prefix \"{}\")...",
        filter.name_prefix
    ));

    match platform.request_device(filter).await {
        Ok(Some(device)) => {
            log.push(format!(
                "Device selected: {} ({})",
                device.name().unwrap_or_else(|| "unnamed".to_string()),
                if device.supports_link() {
                    "GATT supported"
                } else {
                    "No GATT"
                }
            ));
            Ok(device)
        }
        Ok(None) => {
            log.push("No device selected");
            Err(VozyError::NoDeviceSelected)
        }
        Err(PlatformError::Unsupported) => {
            log.push("Bluetooth is not available on this platform");
            Err(VozyError::PlatformUnsupported)
        }
        Err(PlatformError::Failure(message)) => {
            log.push(format!("Device request failed: {}", message));
            Err(VozyError::ConnectionFailure(message))
        }
    }
}
