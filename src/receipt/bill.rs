//! # Bill Receipt
//!
//! Prints a looked-up [`BillRecord`]: header, the named fields as
//! label/value rows, the amount due large, then every remaining field from
//! the bill page.

use super::{CutKind, Layout, ReceiptEncoder, RuleStyle};
use crate::lookup::BillRecord;
use crate::protocol::Alignment;

/// Bill summary receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillReceipt {
    pub record: BillRecord,
}

impl BillReceipt {
    pub fn new(record: BillRecord) -> Self {
        Self { record }
    }
}

/// Page labels already printed from named fields.
const PRINTED_LABELS: &[&str] = &["Amount Before Due:", "Amount After Due:"];

impl Layout for BillReceipt {
    fn layout(&self, encoder: &mut ReceiptEncoder) {
        let record = &self.record;

        encoder
            .align(Alignment::Center)
            .bold(true)
            .size(2, 2)
            .text("BILL SUMMARY")
            .size(1, 1)
            .bold(false)
            .newlines(2);

        if !record.success {
            let message = record.error.as_deref().unwrap_or("Bill lookup failed");
            encoder.line(message).newlines(2).cut(CutKind::Full);
            return;
        }

        encoder.align(Alignment::Left);
        if let Some(account) = &record.account_number {
            row(encoder, "Account", account);
        }
        if let Some(route) = &record.route_code {
            row(encoder, "Route", route);
        }
        encoder.rule(RuleStyle::Single);

        if let Some(amount) = &record.amount {
            encoder
                .align(Alignment::Center)
                .line("AMOUNT DUE")
                .bold(true)
                .size(2, 2)
                .text(&format!("PHP {}", amount))
                .size(1, 1)
                .bold(false)
                .newline()
                .align(Alignment::Left);
        }
        if let Some(due) = &record.due_date {
            row(encoder, "Due Date", due);
        }
        if let Some(before) = &record.amount_before_due {
            row(encoder, "Before Due", before);
        }
        if let Some(after) = &record.amount_after_due {
            row(encoder, "After Due", after);
        }

        let extra: Vec<_> = record
            .fields
            .iter()
            .filter(|(label, _)| !PRINTED_LABELS.contains(&label.as_str()))
            .collect();
        if !extra.is_empty() {
            encoder.rule(RuleStyle::Single);
            for (label, value) in extra {
                row(encoder, label.trim_end_matches(':'), value);
            }
        }

        encoder
            .rule(RuleStyle::Double)
            .align(Alignment::Center)
            .line("Thank you!")
            .newlines(2)
            .cut(CutKind::Full);
    }
}

/// Label left, value right. Falls back to two lines when both don't fit.
fn row(encoder: &mut ReceiptEncoder, label: &str, value: &str) {
    let columns = usize::from(encoder.columns());
    let used = label.chars().count() + value.chars().count();
    if used < columns {
        let pad = columns - used;
        encoder.line(&format!("{}{}{}", label, " ".repeat(pad), value));
    } else {
        encoder
            .line(label)
            .align(Alignment::Right)
            .line(value)
            .align(Alignment::Left);
    }
}
