//! # Bill Page Parser
//!
//! Extracts bill fields from the upstream search result page. The page is
//! server-rendered HTML with no stable ids, so fields are located relative
//! to their visible labels:
//!
//! | Field | Located by |
//! |-------|------------|
//! | amount | first `<span>` after "Kindly Pay" |
//! | due date | first `<p>` after "Due Date" |
//! | account number | first `<p>` after "Account Number" |
//! | before/after due | `<dd>` following "Amount Before Due:" / "Amount After Due:" |
//! | everything else | every `<dt>`/`<dd>` pair, whitespace collapsed |
//!
//! Element text is only matched when it contains no nested tags.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::BillRecord;

/// Message returned when the page is not a bill.
pub const NOT_FOUND_MESSAGE: &str = "No bill found or invalid account/route code";

static SPAN: LazyLock<Regex> = LazyLock::new(|| compile(r"<span[^>]*>([^<]+)</span>"));

// `<p` must be followed by `>` or attributes, so `<pre>` never matches
static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| compile(r"<p(?:\s[^>]*)?>([^<]+)</p>"));

static GRID_PAIR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"<dt[^>]*>([^<]+)</dt>\s*<dd[^>]*>([^<]+)</dd>"));

// The label may close its `<dt>` before the value's `<dd>`
static BEFORE_DUE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"Amount Before Due:[^<]*(?:</dt>\s*)?<dd[^>]*>([^<]+)</dd>")
});

static AFTER_DUE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"Amount After Due:[^<]*(?:</dt>\s*)?<dd[^>]*>([^<]+)</dd>")
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static bill page pattern should always compile")
}

/// Parse a bill search result page.
///
/// A page is a bill only if it contains both "Invoice" and "Thank you!".
pub fn parse_bill_html(html: &str) -> BillRecord {
    if !(html.contains("Invoice") && html.contains("Thank you!")) {
        return BillRecord::failure(NOT_FOUND_MESSAGE);
    }

    let amount = text_after(html, "Kindly Pay", &SPAN).and_then(clean_amount);
    let due_date = text_after(html, "Due Date", &PARAGRAPH).map(|s| s.trim().to_string());
    let account_number =
        text_after(html, "Account Number", &PARAGRAPH).map(|s| s.trim().to_string());

    let fields = grid_pairs(html);

    let amount_before_due = first_capture(&BEFORE_DUE, html).and_then(clean_amount);
    let amount_after_due = first_capture(&AFTER_DUE, html).and_then(clean_amount);

    BillRecord {
        success: true,
        account_number,
        route_code: None,
        amount,
        due_date,
        amount_before_due,
        amount_after_due,
        error: None,
        fields,
    }
}

/// Strip peso signs (including the mis-decoded UTF-8 form) and whitespace.
fn clean_amount(value: &str) -> Option<String> {
    let cleaned = value.replace("â‚±", "").replace('₱', "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_capture<'a>(pattern: &Regex, haystack: &'a str) -> Option<&'a str> {
    pattern
        .captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// First match of `element` after the first occurrence of `label`.
fn text_after<'a>(html: &'a str, label: &str, element: &Regex) -> Option<&'a str> {
    let start = html.find(label)?;
    first_capture(element, &html[start..])
}

/// All `<dt>key</dt> <dd>value</dd>` pairs. Later duplicates overwrite
/// earlier ones.
fn grid_pairs(html: &str) -> BTreeMap<String, String> {
    GRID_PAIR
        .captures_iter(html)
        .map(|c| (collapse_whitespace(&c[1]), collapse_whitespace(&c[2])))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
