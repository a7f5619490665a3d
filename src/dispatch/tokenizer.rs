//! Token splitter.
//!
//! Splits on single spaces with no quoting or escaping. Consecutive spaces
//! yield empty tokens, which are passed through unchanged.

/// Split a raw command into tokens. Empty input yields no tokens.
pub fn split(raw: &str) -> Vec<&str> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(' ').collect()
}
