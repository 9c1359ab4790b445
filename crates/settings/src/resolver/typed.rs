//! Parsing rules for typed settings.
//!
//! Invariants:
//! - The default only applies when the raw value is empty (booleans) or
//!   not a plain decimal number (integers).
//! - A non-empty, non-truthy boolean is `false` even when the default is `true`.

/// Truthy spellings, compared case-insensitively.
const TRUE_VALUES: [&str; 4] = ["1", "yes", "on", "true"];

/// Parses a raw setting as a boolean.
pub fn parse_boolean(raw: &str, default: bool) -> bool {
    if raw.is_empty() {
        return default;
    }
    let lowered = raw.to_lowercase();
    TRUE_VALUES.contains(&lowered.as_str())
}

/// Parses a raw setting as an unsigned integer.
///
/// Only ASCII digits are accepted; leading zeros are fine. Signs, whitespace,
/// and values beyond `u64::MAX` yield `default`.
pub fn parse_uint(raw: &str, default: u64) -> u64 {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return default;
    }
    raw.parse().unwrap_or(default)
}
