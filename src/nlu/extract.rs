//! Identifier extraction.

use once_cell::sync::Lazy;
use regex::Regex;

static ORDER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ord[0-9]+").expect("order id pattern is valid"));

static REFUND_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)rfd-?[a-z0-9]+").expect("refund id pattern is valid"));

/// First `ORD<digits>` token in `text`, upper-cased.
pub fn extract_order_id(text: &str) -> Option<String> {
    ORDER_ID.find(text).map(|m| m.as_str().to_uppercase())
}

/// First `RFD[-]<alphanumerics>` token in `text`, upper-cased.
pub fn extract_refund_id(text: &str) -> Option<String> {
    REFUND_ID.find(text).map(|m| m.as_str().to_uppercase())
}
