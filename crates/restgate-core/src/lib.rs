//! # restgate Core
//!
//! Pure decision logic for restgate: which operation a request method
//! targets, what it requires, and how a request is rejected.
//!
//! This crate performs no I/O and calls no handlers. It works on
//! [`http::Method`] values and [`Permission`] sets only.
//!
//! ## Key Types
//!
//! - [`Operation`] - One of List, Post, Get, Put, Del
//! - [`Decision`] - Forward, method-not-allowed, or forbidden
//!
//! ## Resolution
//!
//! | Method | Operation |
//! |--------|-----------|
//! | GET    | Get if registered, else List |
//! | POST   | Post |
//! | PUT    | Put |
//! | DELETE | Del |
//!
//! ```rust
//! use http::Method;
//! use restgate_core::{decide, Decision, Operation, Permission};
//!
//! let registered = Permission::LIST | Permission::POST;
//! let decision = decide(&Method::GET, registered, || Permission::READ);
//! assert_eq!(decision, Decision::Forward(Operation::List));
//! ```

pub mod decision;
pub mod operation;
pub mod resolve;

pub use decision::{decide, Decision};
pub use operation::Operation;
pub use resolve::{allowed_methods, resolve};

pub use restgate_perms::Permission;
