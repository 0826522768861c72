//! # restgate Permissions
//!
//! The permission model shared by every restgate dispatch handler.
//!
//! ## Overview
//!
//! A resource path supports up to five operations. A [`Permission`] is a
//! bitmask with one bit per operation, plus the composite sets
//! [`Permission::READ`], [`Permission::WRITE`] and [`Permission::ALL`].
//!
//! An [`Authorizer`] maps a request to the permissions its caller holds.
//! Two standard authorizers are provided:
//!
//! - [`Everyone`]: grants a fixed set regardless of the request
//! - [`Any`]: grants whatever any of its members grants
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use restgate_perms::{any, everyone, Authorizer, Permission};
//!
//! // Members may write, everyone may read.
//! let members = |user: &str| {
//!     if user.starts_with("member:") {
//!         Permission::WRITE
//!     } else {
//!         Permission::NONE
//!     }
//! };
//! let auth = any([
//!     Arc::new(everyone(Permission::READ)) as Arc<dyn Authorizer<str>>,
//!     Arc::new(members) as Arc<dyn Authorizer<str>>,
//! ]);
//!
//! assert_eq!(auth.authorize("member:ada"), Permission::ALL);
//! assert!(!auth.authorize("guest").allows(Permission::PUT));
//! ```
//!
//! Permissions can also be read from configuration text:
//!
//! ```rust
//! use restgate_perms::Permission;
//!
//! let p: Permission = "read | delete".parse().unwrap();
//! assert_eq!(p, Permission::LIST | Permission::GET | Permission::DEL);
//! assert_eq!(p.to_string(), "list|get|del");
//! ```

pub mod authorizer;
pub mod error;
pub mod permission;

pub use authorizer::{any, everyone, Any, Authorizer, Everyone};
pub use error::{PermsError, Result};
pub use permission::Permission;
