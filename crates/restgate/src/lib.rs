//! # restgate
//!
//! Register one object per REST resource path instead of writing per-method
//! routing and authorization by hand.
//!
//! ## Overview
//!
//! A [`DispatchHandler`] holds up to five operation handlers and one
//! authorizer:
//!
//! - **List**: list all elements of a collection (`GET /orders`)
//! - **Post**: create an element (`POST /orders`)
//! - **Get**: retrieve an element (`GET /orders/{id}`)
//! - **Put**: replace an element (`PUT /orders/{id}`)
//! - **Del**: delete an element (`DELETE /orders/{id}`)
//!
//! Requests for a method with no handler get `405 Method Not Allowed` with an
//! `Allow` header. Requests whose caller lacks the operation's permission get
//! `403 Forbidden`. Everything else reaches the operation handler unchanged.
//!
//! Without an authorizer everyone may read and no-one may write.
//!
//! ## Usage
//!
//! ```rust
//! use http::{Method, Request, Response, StatusCode};
//! use restgate::{DispatchHandler, Permission};
//!
//! fn members_can_write(req: &Request<String>) -> Permission {
//!     if req.headers().contains_key("x-member") {
//!         Permission::ALL
//!     } else {
//!         Permission::READ
//!     }
//! }
//!
//! let orders: DispatchHandler<String, String> = DispatchHandler::builder()
//!     .list(|_req: Request<String>| Response::new("[]".to_string()))
//!     .post(|req: Request<String>| Response::new(req.into_body()))
//!     .authorizer(members_can_write)
//!     .build();
//!
//! let req = Request::post("/orders").body("{}".to_string()).unwrap();
//! assert_eq!(orders.handle(req).status(), StatusCode::FORBIDDEN);
//!
//! let req = Request::delete("/orders").body(String::new()).unwrap();
//! let res = orders.handle(req);
//! assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
//! assert_eq!(res.headers().get_all("allow").iter().count(), 2);
//! ```
//!
//! ## Re-exports
//!
//! - `restgate::core` - Method resolution and decisions
//! - `restgate::perms` - Permissions and authorizers

pub mod dispatch;
pub mod handler;
pub mod response;
pub mod service;

// Re-export component crates
pub use restgate_core as core;
pub use restgate_perms as perms;

// Re-export main types for convenience
pub use dispatch::{DispatchHandler, DispatchHandlerBuilder, SharedAuthorizer};
pub use handler::{OperationHandler, SharedHandler};

pub use restgate_core::{Decision, Operation};
pub use restgate_perms::{any, everyone, Any, Authorizer, Everyone, Permission, PermsError};
