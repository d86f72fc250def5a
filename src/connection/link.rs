//! Link establishment step.

use crate::error::VozyError;
use crate::transport::platform::Device;

use super::DiagnosticsLog;

/// Open the GATT link to `device`.
///
/// A device without GATT support fails with
/// [`VozyError::LinkUnsupported`] before any connection request is made.
/// Platform failures become [`VozyError::ConnectionFailure`].
pub async fn open_link<D: Device>(device: &D, log: &mut DiagnosticsLog) -> Result<D::Link, VozyError> {
    if !device.supports_link() {
        log.push("Device does not support GATT");
        return Err(VozyError::LinkUnsupported);
    }

    match device.open_link().await {
        Ok(link) => {
            log.push("Connected to GATT server");
            Ok(link)
        }
        Err(e) => {
            log.push(format!("GATT connection failed: {}", e));
            Err(VozyError::ConnectionFailure(e.to_string()))
        }
    }
}
