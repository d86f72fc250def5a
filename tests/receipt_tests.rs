//! # Receipt Tests
//!
//! Byte-level checks of the encoding pipeline for every layout.

use pretty_assertions::assert_eq;
use vozy::ir::Op;
use vozy::lookup::BillRecord;
use vozy::protocol::{Codepage, Language};
use vozy::receipt::{BillReceipt, EncoderConfig, Layout, QueueTicket, Receipt, ReceiptEncoder};

struct Greeting;

impl Layout for Greeting {
    fn layout(&self, encoder: &mut ReceiptEncoder) {
        encoder.bold(true).line("hello").bold(false);
    }
}

/// Resets the printer halfway through.
struct Reset;

impl Layout for Reset {
    fn layout(&self, encoder: &mut ReceiptEncoder) {
        encoder.bold(true).line("A").initialize().line("B");
    }
}

fn paid_bill() -> BillRecord {
    BillRecord {
        success: true,
        account_number: Some("0123-4567".into()),
        route_code: Some("R12".into()),
        amount: Some("1,234.56".into()),
        due_date: Some("Oct 30, 2026".into()),
        ..BillRecord::default()
    }
}

fn ticket() -> QueueTicket {
    QueueTicket::new("PEDIATRICS", 42).issued_at("2026-10-18 09:30:00")
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

// ============================================================================
// LEADING NEWLINE
// ============================================================================

#[test]
fn test_every_layout_starts_with_newline() {
    let config = EncoderConfig::default();

    let programs = [
        Receipt::new(ticket(), config.clone()).compile(),
        Receipt::new(BillReceipt::new(paid_bill()), config.clone()).compile(),
        Receipt::new(BillReceipt::new(BillRecord::failure("nope")), config.clone()).compile(),
        Receipt::new(Greeting, config).compile(),
    ];

    for program in &programs {
        assert_eq!(program.first_structural(), Some(&Op::Newline));
    }
}

#[test]
fn test_escpos_prologue() {
    let bytes = Receipt::new(ticket(), EncoderConfig::default()).encode();
    assert_eq!(&bytes[..6], &[0x1B, 0x40, 0x1B, 0x74, 0x00, 0x0A]);
}

#[test]
fn test_starprnt_prologue() {
    let bytes = Receipt::new(ticket(), EncoderConfig::for_model("tsp650ii")).encode();
    assert_eq!(&bytes[..7], &[0x1B, 0x40, 0x1B, 0x1D, 0x74, 0x01, 0x0A]);
}

#[test]
fn test_ascii_prologue() {
    let config = EncoderConfig {
        codepage: Some(Codepage::Ascii),
        ..EncoderConfig::default()
    };
    let bytes = Receipt::new(Greeting, config).encode();
    assert_eq!(&bytes[..3], &[0x1B, 0x40, 0x0A]);
}

#[test]
fn test_language_override() {
    let config = EncoderConfig {
        printer_model: Some("tsp650ii".into()),
        language: Some(Language::EscPos),
        ..EncoderConfig::default()
    };
    let bytes = Receipt::new(Greeting, config).encode();
    assert_eq!(&bytes[..6], &[0x1B, 0x40, 0x1B, 0x74, 0x00, 0x0A]);
}

// ============================================================================
// CONTENT
// ============================================================================

#[test]
fn test_queue_ticket_content() {
    let bytes = Receipt::new(ticket(), EncoderConfig::default()).encode();

    assert!(contains(&bytes, b"QUEUE NUMBER"));
    assert!(contains(&bytes, b"PEDIATRICS"));
    assert!(contains(&bytes, b"042"));
    assert!(contains(&bytes, b"Issued: 2026-10-18 09:30:00"));
    assert!(contains(&bytes, b"Thank you!"));
    // Full cut ends the ticket
    assert_eq!(&bytes[bytes.len() - 4..], &[0x1D, 0x56, 0x41, 0x00]);
}

#[test]
fn test_bill_receipt_content() {
    let bytes = Receipt::new(BillReceipt::new(paid_bill()), EncoderConfig::default()).encode();

    assert!(contains(&bytes, b"BILL SUMMARY"));
    assert!(contains(&bytes, b"0123-4567"));
    assert!(contains(&bytes, b"PHP 1,234.56"));
    assert!(contains(&bytes, b"Oct 30, 2026"));
}

#[test]
fn test_failed_bill_prints_error() {
    let record = BillRecord::failure("No bill found or invalid account/route code");
    let bytes = Receipt::new(BillReceipt::new(record), EncoderConfig::default()).encode();

    assert!(contains(&bytes, b"No bill found"));
    assert!(!contains(&bytes, b"AMOUNT DUE"));
}

#[test]
fn test_compile_is_deterministic() {
    let receipt = Receipt::new(ticket(), EncoderConfig::default());
    assert_eq!(receipt.encode(), receipt.encode());
}

#[test]
fn test_initialize_mid_receipt_resets_styles() {
    let program = Receipt::new(Reset, EncoderConfig::default()).compile();
    assert_eq!(
        program.ops,
        vec![
            Op::Init,
            Op::SetCodepage(Codepage::Cp437),
            Op::Newline,
            Op::SetBold(true),
            Op::Text("A".into()),
            Op::Newline,
            Op::Init,
            Op::SetCodepage(Codepage::Cp437),
            Op::Text("B".into()),
            Op::Newline,
        ]
    );

    let bytes = Receipt::new(Reset, EncoderConfig::default()).encode();
    let resets = bytes.windows(2).filter(|w| *w == [0x1B, 0x40]).count();
    assert_eq!(resets, 2);
}
