//! The decision surface consumed by outer layers.

use serde_json::Value;

use crate::decision::Decision;
use crate::types::Credentials;

/// Anything that can decide whether a caller may touch a named target.
///
/// A property-access layer calls this before every read, write, or clear.
/// `target` is a resource or scope name, `credentials` carries the claimed
/// identity and its proof, and `args` are forwarded to capability callbacks.
pub trait Authorizer {
    /// Decide access to `target`.
    fn authorize(&self, target: &str, credentials: Credentials<'_>, args: &[Value]) -> Decision;
}

impl<T: Authorizer + ?Sized> Authorizer for &T {
    fn authorize(&self, target: &str, credentials: Credentials<'_>, args: &[Value]) -> Decision {
        (**self).authorize(target, credentials, args)
    }
}

impl<T: Authorizer + ?Sized> Authorizer for Box<T> {
    fn authorize(&self, target: &str, credentials: Credentials<'_>, args: &[Value]) -> Decision {
        (**self).authorize(target, credentials, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Authorizer for Named {
        fn authorize(&self, target: &str, _: Credentials<'_>, _: &[Value]) -> Decision {
            Decision::from_bool(target == self.0)
        }
    }

    #[test]
    fn test_dyn_and_ref_forwarding() {
        let boxed: Box<dyn Authorizer> = Box::new(Named("open"));
        assert!(boxed.authorize("open", Credentials::anonymous(), &[]).is_allow());
        let by_ref = &Named("open");
        assert!(by_ref.authorize("shut", Credentials::anonymous(), &[]).is_deny());
    }
}
