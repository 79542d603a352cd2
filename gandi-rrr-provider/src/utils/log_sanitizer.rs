//! Log sanitization utilities
//!
//! XML-RPC bodies carry the API key as their first parameter and zone dumps can
//! be large, so nothing is written to debug logs without passing through here.

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 512;

/// Placeholder written in place of secrets.
const REDACTED: &str = "***";

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` bytes with a suffix giving the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Replace every occurrence of `secret` in `s`, then truncate.
pub fn redact_for_log(s: &str, secret: &str) -> String {
    if secret.is_empty() {
        truncate_for_log(s)
    } else {
        truncate_for_log(&s.replace(secret, REDACTED))
    }
}
