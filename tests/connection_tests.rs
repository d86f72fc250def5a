//! # Connection Tests
//!
//! End-to-end behavior of the connection state machine against scripted
//! peripherals.

use pretty_assertions::assert_eq;
use uuid::Uuid;
use vozy::VozyError;
use vozy::connection::{ConnectOptions, ConnectionState, PrinterConnection};
use vozy::transport::{
    Capabilities, Characteristic, MockCharacteristic, MockDevice, MockPlatform, MockService,
    WriteMode,
};

fn uuid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn connect_to(device: MockDevice) -> PrinterConnection<MockPlatform> {
    PrinterConnection::new(
        MockPlatform::new().with_device(device),
        ConnectOptions::default(),
    )
}

fn simple_printer() -> MockDevice {
    MockDevice::new("VOZY-58").with_service(
        MockService::new(uuid(0x18f0))
            .with_characteristic(MockCharacteristic::new(uuid(0x2af1), Capabilities::write())),
    )
}

// ============================================================================
// LINK SUPPORT
// ============================================================================

#[tokio::test]
async fn test_device_without_link_support() {
    let device = MockDevice::new("VOZY-58").without_gatt();
    let handle = device.clone();
    let mut printer = connect_to(device);

    printer.connect().await;

    let snapshot = printer.snapshot();
    assert!(!snapshot.ready);
    assert!(snapshot.channel.is_none());
    assert!(snapshot.last_error.unwrap().contains("does not support GATT"));
    assert_eq!(handle.link_attempts(), 0);
    assert!(
        printer
            .log_messages()
            .contains(&"Device does not support GATT".to_string())
    );
}

// ============================================================================
// CHANNEL SELECTION
// ============================================================================

#[tokio::test]
async fn test_selects_writable_characteristic_in_second_service() {
    let device = MockDevice::new("VOZY-58")
        .with_service(
            MockService::new(uuid(0x1800))
                .with_characteristic(MockCharacteristic::new(uuid(0x2a00), Capabilities::read_notify()))
                .with_characteristic(MockCharacteristic::new(uuid(0x2a01), Capabilities::read_notify())),
        )
        .with_service(
            MockService::new(uuid(0x18f0))
                .with_characteristic(MockCharacteristic::new(uuid(0x2af0), Capabilities::read_notify()))
                .with_characteristic(MockCharacteristic::new(
                    uuid(0x2af1),
                    Capabilities::write_without_response(),
                )),
        );
    let mut printer = connect_to(device);

    printer.connect().await;

    assert!(printer.is_ready());
    let channel = printer.snapshot().channel.unwrap();
    assert_eq!(channel.id(), uuid(0x2af1));
    assert!(matches!(printer.state(), ConnectionState::Ready { .. }));
}

#[tokio::test]
async fn test_first_writable_wins() {
    let device = MockDevice::new("VOZY-58").with_service(
        MockService::new(uuid(0x18f0))
            .with_characteristic(MockCharacteristic::new(uuid(0x2af1), Capabilities::write()))
            .with_characteristic(MockCharacteristic::new(uuid(0x2af2), Capabilities::write())),
    );
    let mut printer = connect_to(device);

    printer.connect().await;

    assert_eq!(printer.snapshot().channel.unwrap().id(), uuid(0x2af1));
    // The second characteristic is never inspected
    assert!(
        !printer
            .log_messages()
            .iter()
            .any(|m| m.contains(&uuid(0x2af2).to_string()))
    );
}

#[tokio::test]
async fn test_no_writable_characteristic() {
    let device = MockDevice::new("VOZY-58").with_service(
        MockService::new(uuid(0x180a))
            .with_characteristic(MockCharacteristic::new(uuid(0x2a29), Capabilities::read_notify())),
    );
    let handle = device.clone();
    let mut printer = connect_to(device);

    printer.connect().await;

    let snapshot = printer.snapshot();
    assert!(!snapshot.ready);
    assert!(snapshot.channel.is_none());
    assert_eq!(
        snapshot.last_error.as_deref(),
        Some("No writable characteristic found")
    );
    // Device and link acquired before the scan are kept
    assert!(snapshot.device.is_some());
    assert!(snapshot.link.is_some());
    assert_eq!(handle.link_attempts(), 1);
    assert_eq!(printer.state().name(), "failed");
}

// ============================================================================
// DISCOVERY AND LINK FAILURES
// ============================================================================

#[tokio::test]
async fn test_unsupported_platform() {
    let mut printer = PrinterConnection::new(MockPlatform::unsupported(), ConnectOptions::default());
    printer.connect().await;

    assert_eq!(
        printer.last_error(),
        Some("Bluetooth is not available on this platform")
    );
    assert!(!printer.is_ready());
}

#[tokio::test]
async fn test_discovery_cancelled() {
    let platform = MockPlatform::new().with_device(MockDevice::new("OTHER-PRINTER"));
    let mut printer = PrinterConnection::new(platform, ConnectOptions::default());
    printer.connect().await;

    assert_eq!(printer.last_error(), Some("No printer selected"));
    assert!(printer.snapshot().device.is_none());
}

#[tokio::test]
async fn test_link_failure_keeps_device() {
    let device = simple_printer().failing_connect("Connection attempt failed");
    let mut printer = connect_to(device);
    printer.connect().await;

    let snapshot = printer.snapshot();
    assert!(snapshot.device.is_some());
    assert!(snapshot.link.is_none());
    assert_eq!(
        snapshot.last_error.as_deref(),
        Some("Connection failed: Connection attempt failed")
    );
    assert!(
        printer
            .log_messages()
            .iter()
            .any(|m| m == "GATT connection failed: Connection attempt failed")
    );
}

// ============================================================================
// WRITES
// ============================================================================

#[tokio::test]
async fn test_write_before_ready_is_rejected() {
    let device = simple_printer();
    let writes = device.write_log();
    let mut printer = connect_to(device);

    let err = printer.write(b"hello").await.unwrap_err();

    assert!(matches!(err, VozyError::NotReady));
    assert!(writes.is_empty());
    assert!(printer.last_error().is_none());
}

#[tokio::test]
async fn test_write_after_failed_connect_is_rejected() {
    let device = MockDevice::new("VOZY-58").without_gatt();
    let writes = device.write_log();
    let mut printer = connect_to(device);
    printer.connect().await;

    assert!(matches!(
        printer.write(b"hello").await,
        Err(VozyError::NotReady)
    ));
    assert!(writes.is_empty());
}

#[tokio::test]
async fn test_write_sends_exact_payload_once() {
    let device = simple_printer();
    let writes = device.write_log();
    let mut printer = connect_to(device);
    printer.connect().await;

    let payload = vec![0x1B, 0x40, 0x0A, b'h', b'i', 0x0A];
    printer.write(&payload).await.unwrap();

    let records = writes.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].payload, payload);
    assert_eq!(records[0].characteristic, uuid(0x2af1));
    assert_eq!(records[0].mode, WriteMode::WithResponse);
    assert_eq!(printer.log_messages().last().unwrap(), "Write successful");
}

#[tokio::test]
async fn test_write_failure_is_recorded_and_returned() {
    let device = MockDevice::new("VOZY-58").with_service(
        MockService::new(uuid(0x18f0)).with_characteristic(
            MockCharacteristic::new(uuid(0x2af1), Capabilities::write())
                .failing_writes("GATT Server is disconnected."),
        ),
    );
    let writes = device.write_log();
    let mut printer = connect_to(device);
    printer.connect().await;

    let err = printer.write(b"ticket").await.unwrap_err();

    assert_eq!(err.to_string(), "Write failed: GATT Server is disconnected.");
    assert_eq!(
        printer.last_error(),
        Some("Write failed: GATT Server is disconnected.")
    );
    assert_eq!(writes.len(), 1);
}

// ============================================================================
// RECONNECTING
// ============================================================================

#[tokio::test]
async fn test_reconnect_rebuilds_log() {
    let mut printer = connect_to(MockDevice::new("VOZY-58").without_gatt());
    printer.connect().await;
    assert!(printer.last_error().is_some());
    let first_log = printer.log_messages().to_vec();

    printer.connect().await;

    // Same outcome, log not appended to
    assert_eq!(printer.log_messages(), first_log.as_slice());
}

#[tokio::test]
async fn test_connect_twice_stays_ready() {
    let mut printer = connect_to(simple_printer());
    printer.connect().await;
    printer.connect().await;
    assert!(printer.is_ready());
    assert!(printer.last_error().is_none());
    assert_eq!(
        printer
            .log_messages()
            .iter()
            .filter(|m| m.starts_with("Requesting Bluetooth device"))
            .count(),
        1
    );
}

#[tokio::test]
async fn test_reconnect_after_failure_succeeds() {
    let device = simple_printer().without_gatt();
    let switch = device.clone();
    let mut printer = connect_to(device);

    printer.connect().await;
    assert_eq!(printer.last_error(), Some("Device does not support GATT"));
    assert_eq!(printer.state().name(), "failed");

    // Same connection, printer now reachable
    switch.set_gatt(true);
    printer.connect().await;

    assert!(printer.is_ready());
    assert_eq!(printer.last_error(), None);
    assert_eq!(switch.link_attempts(), 1);
    let log = printer.log_messages();
    assert!(!log.iter().any(|m| m == "Device does not support GATT"));
    assert!(!log.iter().any(|m| m.starts_with("Connection error:")));
    assert_eq!(log.last().map(String::as_str), Some("Printer ready for writing"));
}

#[tokio::test]
async fn test_reconnect_clears_write_error() {
    let device = MockDevice::new("VOZY-58").with_service(
        MockService::new(uuid(0x18f0)).with_characteristic(
            MockCharacteristic::new(uuid(0x2af1), Capabilities::write())
                .failing_writes("GATT Server is disconnected."),
        ),
    );
    let mut printer = connect_to(device);
    printer.connect().await;
    assert!(printer.write(b"x").await.is_err());
    assert!(printer.last_error().is_some());

    printer.connect().await;

    assert!(printer.is_ready());
    assert!(printer.last_error().is_none());
    assert!(
        !printer
            .log_messages()
            .iter()
            .any(|m| m.starts_with("Write error:"))
    );
}
