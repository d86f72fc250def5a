//! Writable channel selection step.

use crate::error::VozyError;
use crate::transport::platform::{Characteristic, Link, ServiceGroup};

use super::DiagnosticsLog;

type ChannelOfLink<L> = <<L as Link>::Service as ServiceGroup>::Characteristic;

/// Pick the print channel of an open link.
///
/// Services are visited in platform order and, inside each, characteristics
/// in platform order. The first characteristic accepting either kind of
/// write wins and nothing after it is inspected.
///
/// Every service and every inspected characteristic gets a log entry, so a
/// failed scan shows which characteristics lacked write support.
pub async fn select_writable_channel<L: Link>(
    link: &L,
    log: &mut DiagnosticsLog,
) -> Result<ChannelOfLink<L>, VozyError> {
    let services = link
        .service_groups()
        .await
        .map_err(|e| enumeration_failed(log, e.to_string()))?;
    log.push(format!("Found {} services", services.len()));

    for service in &services {
        log.push(format!("  Service: {}", service.id()));
        let characteristics = service
            .characteristics()
            .await
            .map_err(|e| enumeration_failed(log, e.to_string()))?;

        for characteristic in characteristics {
            let caps = characteristic.capabilities();
            log.push(format!(
                "    Characteristic: {} (write: {}, writeWithoutResponse: {})",
                characteristic.id(),
                caps.write,
                caps.write_without_response
            ));
            if caps.is_writable() {
                log.push(format!(
                    "Writable characteristic found: {}",
                    characteristic.id()
                ));
                return Ok(characteristic);
            }
        }
    }

    log.push("No writable characteristic found");
    Err(VozyError::NoWritableChannel)
}

fn enumeration_failed(log: &mut DiagnosticsLog, message: String) -> VozyError {
    log.push(format!("Service discovery failed: {}", message));
    VozyError::ConnectionFailure(message)
}
