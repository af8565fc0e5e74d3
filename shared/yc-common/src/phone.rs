//! Phone and Identity-Document Validation
//!
//! Phone numbers are accepted in any punctuation the shell produces and
//! normalized to bare digits: 9 digits (local) or 12 digits (with country
//! code). NINs are 8 alphanumeric characters.

use std::sync::LazyLock;

use regex::Regex;

/// NIN validation regex (matches the profile constraint).
static NIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{8}$").unwrap());

/// Strip non-digits and accept exactly 9 or 12 digits.
///
/// Returns the normalized digit string, or `None` when the input does not
/// normalize to a valid length.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        9 | 12 => Some(digits),
        _ => None,
    }
}

/// Whether `nin` is a well-formed national identification number.
#[must_use]
pub fn is_valid_nin(nin: &str) -> bool {
    NIN_REGEX.is_match(nin)
}
