//! Character-set operations over capability and requirement strings.
//!
//! Strings are treated as unordered sets of Unicode scalar values; order and
//! duplicates carry no meaning.

use std::collections::BTreeSet;

use warden_core::{AuthError, Result};

/// Whether `held` and `required` share at least one character.
///
/// One overlapping character is enough. This is an any-overlap rule, not a
/// subset or superset test.
pub fn intersects(held: &str, required: &str) -> bool {
    let held: BTreeSet<char> = held.chars().collect();
    required.chars().any(|c| held.contains(&c))
}

/// Remove from `existing` every character that appears in `pattern`.
///
/// An empty pattern is rejected as malformed.
pub fn remove_chars(existing: &str, pattern: &str) -> Result<String> {
    if pattern.is_empty() {
        return Err(AuthError::InvalidArgument("empty removal pattern".into()));
    }
    let strip: BTreeSet<char> = pattern.chars().collect();
    Ok(existing.chars().filter(|c| !strip.contains(c)).collect())
}
