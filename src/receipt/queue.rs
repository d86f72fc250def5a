//! # Queue Ticket
//!
//! The take-a-number slip printed at a service counter.
//!
//! ```text
//! ┌────────────────────────────────┐
//! │                                │
//! │     ▓▓ Q U E U E  N U M ▓▓     │
//! │                                │
//! │           PEDIATRICS           │
//! │                                │
//! │              042               │
//! │                                │
//! │ ══════════════════════════════ │
//! │                                │
//! │  Issued: 2026-10-18 09:30:00   │
//! │ Please wait for your number to │
//! │           be called            │
//! │                                │
//! │           Thank you!           │
//! └────────────────────────────────┘
//! ```

use chrono::Local;

use super::{CutKind, Layout, ReceiptEncoder, RuleStyle};
use crate::protocol::Alignment;

/// Queue ticket for a department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTicket {
    pub department: String,
    pub number: u32,
    /// Pre-formatted issue time
    pub issued: String,
}

impl QueueTicket {
    /// Ticket issued now (local time).
    pub fn new(department: impl Into<String>, number: u32) -> Self {
        Self {
            department: department.into(),
            number,
            issued: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Override the issue time.
    pub fn issued_at(mut self, issued: impl Into<String>) -> Self {
        self.issued = issued.into();
        self
    }

    /// Ticket number as printed: at least three digits.
    pub fn display_number(&self) -> String {
        format!("{:03}", self.number)
    }
}

impl Layout for QueueTicket {
    fn layout(&self, encoder: &mut ReceiptEncoder) {
        // Header
        encoder
            .bold(true)
            .invert(true)
            .size(2, 2)
            .align(Alignment::Center)
            .text("QUEUE NUMBER")
            .invert(false)
            .size(1, 1)
            .bold(false)
            .newlines(2);

        // Department
        encoder
            .size(2, 1)
            .bold(true)
            .text(&self.department)
            .bold(false)
            .size(1, 1)
            .newlines(2);

        // Number
        encoder
            .size(3, 3)
            .bold(true)
            .text(&self.display_number())
            .size(1, 1)
            .bold(false)
            .newlines(2);

        encoder.rule(RuleStyle::Double).newline();

        // Footer
        encoder
            .align(Alignment::Center)
            .text(&format!("Issued: {}", self.issued))
            .newline()
            .text("Please wait for your number to be called")
            .newlines(2)
            .text("Thank you!")
            .newlines(2)
            .cut(CutKind::Full);
    }
}
