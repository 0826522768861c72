//! # restgate Testkit
//!
//! Testing utilities for restgate.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: recording operation handlers and counting authorizers
//! - **Generators**: Proptest strategies for permissions, operations and methods
//!
//! ## Test Fixtures
//!
//! ```rust
//! use http::{Method, StatusCode};
//! use restgate_perms::Permission;
//! use restgate_testkit::fixtures::{request, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let handler = fixture.dispatch(Permission::LIST | Permission::POST);
//!
//! let response = handler.handle(request(Method::GET, "/orders"));
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(fixture.list.calls(), 1);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use restgate_testkit::generators::{method, permission};
//!
//! proptest! {
//!     #[test]
//!     fn never_forwards_without_permission(m in method(), granted in permission()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    allow_header, request, request_with_body, CountingAuthorizer, RecordingHandler, TestFixture,
    HANDLED_BY,
};
pub use generators::{method, operation, path, permission, rest_method};
