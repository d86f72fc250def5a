//! # Bill Lookup
//!
//! Fetches a bill from the utility's public search page and turns it into
//! a [`BillRecord`].
//!
//! The upstream only serves HTML to browsers, so requests carry the headers
//! a desktop browser would send on a same-origin navigation.

mod parse;

pub use parse::{NOT_FOUND_MESSAGE, parse_bill_html};

use std::collections::BTreeMap;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::VozyError;

/// Default bill search endpoint.
pub const DEFAULT_UPSTREAM: &str = "https://casureco2.com.ph/bill/search";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

const BROWSER_CLIENT_HINTS: &str =
    "\"Not)A;Brand\";v=\"8\", \"Chromium\";v=\"138\", \"Google Chrome\";v=\"138\"";

/// A parsed bill, or the reason there is none.
///
/// Serializes as a flat JSON object: named fields in camelCase, followed
/// by every label/value pair found on the page under its own label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_code: Option<String>,
    /// Amount due, peso sign stripped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_before_due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_after_due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Remaining label/value pairs from the page
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl BillRecord {
    /// A record for a failed lookup.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Look up a bill by account number and route code.
///
/// Transport failures are errors. A page that is not a bill is an
/// unsuccessful [`BillRecord`], not an error.
pub async fn fetch_bill(
    client: &reqwest::Client,
    upstream: &str,
    account: &str,
    route: &str,
) -> Result<BillRecord, VozyError> {
    tracing::info!(account, route, upstream, "looking up bill");

    let html = client
        .get(upstream)
        .query(&[("acct_no", account), ("route_code", route)])
        .headers(browser_headers(upstream))
        .send()
        .await?
        .text()
        .await?;

    let mut record = parse_bill_html(&html);
    if record.success {
        record.route_code.get_or_insert_with(|| route.to_string());
    } else {
        tracing::info!(account, route, "no bill on upstream page");
    }
    Ok(record)
}

/// Headers of a same-origin browser navigation to `upstream`.
fn browser_headers(upstream: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,\
             image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
        ),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(header::USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

    for (name, value) in [
        ("sec-fetch-dest", "document"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-site", "same-origin"),
        ("sec-fetch-user", "?1"),
        ("sec-ch-ua", BROWSER_CLIENT_HINTS),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "\"macOS\""),
    ] {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    // The search form lives one path segment up from the endpoint
    if let Some((base, _)) = upstream.rsplit_once('/') {
        if let Ok(referer) = HeaderValue::from_str(&format!("{}/", base)) {
            headers.insert(header::REFERER, referer);
        }
    }

    headers
}
