//! Proptest generators for property-based testing.

use proptest::prelude::*;

/// A user, admin, resource or scope name.
pub fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}".prop_map(String::from)
}

/// A secret or password. May be empty.
pub fn secret() -> impl Strategy<Value = String> {
    "[ -~]{0,16}".prop_map(String::from)
}

/// A capability or requirement string over a small alphabet, so that
/// overlaps are common.
pub fn capability_string() -> impl Strategy<Value = String> {
    "[rwxdc]{0,6}".prop_map(String::from)
}

/// Two non-empty strings with no character in common.
pub fn disjoint_capability_pair() -> impl Strategy<Value = (String, String)> {
    ("[a-m]{1,6}", "[n-z]{1,6}").prop_map(|(a, b)| (String::from(a), String::from(b)))
}
