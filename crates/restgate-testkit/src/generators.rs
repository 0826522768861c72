//! Proptest generators for property-based testing.

use http::Method;
use proptest::prelude::*;

use restgate_core::Operation;
use restgate_perms::Permission;

/// Generate any permission set, including the empty one.
pub fn permission() -> impl Strategy<Value = Permission> {
    (0u8..=Permission::ALL.bits()).prop_map(Permission::from_bits_truncate)
}

/// Generate a single operation.
pub fn operation() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

/// Generate a method dispatch recognizes.
pub fn rest_method() -> impl Strategy<Value = Method> {
    prop_oneof![
        Just(Method::GET),
        Just(Method::POST),
        Just(Method::PUT),
        Just(Method::DELETE),
    ]
}

/// Generate any method, mostly REST ones, sometimes others.
pub fn method() -> impl Strategy<Value = Method> {
    prop_oneof![
        4 => rest_method(),
        1 => Just(Method::HEAD),
        1 => Just(Method::OPTIONS),
        1 => Just(Method::PATCH),
        1 => "[A-Z]{3,8}".prop_filter_map("not a valid method", |s| {
            Method::from_bytes(s.as_bytes()).ok()
        }),
    ]
}

/// Generate a request path.
pub fn path() -> impl Strategy<Value = String> {
    "(/[a-z0-9]{1,8}){1,3}".prop_map(String::from)
}
