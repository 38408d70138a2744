//! Strong type definitions for Warden.
//!
//! Identities are passed as borrowed [`Credentials`] so that secrets never
//! need to be copied into engine state.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{AuthError, Result};

/// A caller-supplied identity and proof.
///
/// Both halves are optional: the bootstrap-open admin model accepts fully
/// anonymous callers until an administrator is configured.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Claimed name.
    pub name: Option<&'a str>,
    /// Proof (password or shared secret).
    pub secret: Option<&'a str>,
}

impl<'a> Credentials<'a> {
    /// Credentials with both a name and a secret.
    pub const fn new(name: &'a str, secret: &'a str) -> Self {
        Self {
            name: Some(name),
            secret: Some(secret),
        }
    }

    /// No name, no secret.
    pub const fn anonymous() -> Self {
        Self {
            name: None,
            secret: None,
        }
    }

    /// Credentials from optional parts.
    pub const fn from_parts(name: Option<&'a str>, secret: Option<&'a str>) -> Self {
        Self { name, secret }
    }

    /// Whether neither a name nor a secret was given.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_none() && self.secret.is_none()
    }
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("secret", &self.secret.map(|_| "<redacted>"))
            .finish()
    }
}

/// A capability callback: computes a capability from call-time arguments.
pub type CapabilityFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A user's capability.
///
/// Exactly one form is held per user; setting one replaces the other.
#[derive(Clone)]
pub enum Capability {
    /// A literal string of capability characters.
    Literal(String),
    /// A callback evaluated at decision time. Never cached.
    Computed(CapabilityFn),
}

impl Capability {
    /// A literal capability.
    pub fn literal(chars: impl Into<String>) -> Self {
        Capability::Literal(chars.into())
    }

    /// A computed capability.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Capability::Computed(Arc::new(f))
    }

    /// Whether this capability is a callback.
    pub fn is_callable(&self) -> bool {
        matches!(self, Capability::Computed(_))
    }

    /// The literal string, if any.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Capability::Literal(s) => Some(s),
            Capability::Computed(_) => None,
        }
    }

    /// Resolve to a capability string, invoking the callback if needed.
    pub fn evaluate(&self, args: &[Value]) -> Result<String> {
        match self {
            Capability::Literal(s) => Ok(s.clone()),
            Capability::Computed(f) => coerce_to_string(&f(args)),
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Capability::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        Capability::Literal(s.to_string())
    }
}

impl From<String> for Capability {
    fn from(s: String) -> Self {
        Capability::Literal(s)
    }
}

/// Coerce a callback result into a capability string.
///
/// Booleans become `"1"` or `""`, null becomes `""`, numbers their decimal
/// text. Integral floats drop the fraction, so `1.0` reads as `"1"`. Arrays
/// and objects are rejected.
pub fn coerce_to_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(true) => Ok("1".to_string()),
        Value::Bool(false) | Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 => format!("{f:.0}"),
            _ => n.to_string(),
        }),
        Value::Array(_) => Err(AuthError::InvalidArgument(
            "capability callback returned an array".into(),
        )),
        Value::Object(_) => Err(AuthError::InvalidArgument(
            "capability callback returned an object".into(),
        )),
    }
}

/// Truthiness of a callback result.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_coerce_to_string() {
        assert_eq!(coerce_to_string(&json!("rw")).unwrap(), "rw");
        assert_eq!(coerce_to_string(&json!(true)).unwrap(), "1");
        assert_eq!(coerce_to_string(&json!(false)).unwrap(), "");
        assert_eq!(coerce_to_string(&Value::Null).unwrap(), "");
        assert_eq!(coerce_to_string(&json!(42)).unwrap(), "42");
        assert_eq!(coerce_to_string(&json!(1.0)).unwrap(), "1");
        assert_eq!(coerce_to_string(&json!(-3.0)).unwrap(), "-3");
        assert_eq!(coerce_to_string(&json!(2.5)).unwrap(), "2.5");
        assert!(coerce_to_string(&json!(["r"])).is_err());
        assert!(coerce_to_string(&json!({"r": 1})).is_err());
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!("0"), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-0.5), json!("a"), json!("00"), json!([0]), json!({"a": 0})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_computed_evaluates_with_args() {
        let cap = Capability::computed(|args| {
            if args.first() == Some(&json!("owner")) {
                json!("rw")
            } else {
                json!("r")
            }
        });
        assert!(cap.is_callable());
        assert_eq!(cap.evaluate(&[json!("owner")]).unwrap(), "rw");
        assert_eq!(cap.evaluate(&[]).unwrap(), "r");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("root", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("root"));
        assert!(!debug.contains("hunter2"));
        assert!(Credentials::anonymous().is_anonymous());
    }

    proptest! {
        #[test]
        fn prop_strings_coerce_to_themselves(s in ".*") {
            prop_assert_eq!(coerce_to_string(&json!(s.clone())).unwrap(), s);
        }

        #[test]
        fn prop_integers_match_their_float_form(n in -1_000_000i64..1_000_000) {
            let as_int = coerce_to_string(&json!(n)).unwrap();
            let as_float = coerce_to_string(&json!(n as f64)).unwrap();
            prop_assert_eq!(as_int, as_float);
        }

        #[test]
        fn prop_truthy_strings_are_nonempty_and_not_zero(s in ".*") {
            prop_assert_eq!(is_truthy(&json!(s.clone())), !s.is_empty() && s != "0");
        }

        #[test]
        fn prop_number_truthiness(n in any::<i32>()) {
            prop_assert_eq!(is_truthy(&json!(n)), n != 0);
        }
    }
}
