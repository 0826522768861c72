//! Method to operation resolution.
//!
//! The set of operations registered on a path is carried as a [`Permission`]
//! whose bits mark the occupied handler slots.

use http::Method;
use restgate_perms::Permission;

use crate::operation::Operation;

/// Resolve the operation a request method targets.
///
/// GET prefers [`Operation::Get`] and falls back to [`Operation::List`].
/// Methods other than GET, POST, PUT and DELETE never resolve.
pub fn resolve(method: &Method, registered: Permission) -> Option<Operation> {
    let candidates: &[Operation] = match *method {
        Method::GET => &[Operation::Get, Operation::List],
        Method::POST => &[Operation::Post],
        Method::PUT => &[Operation::Put],
        Method::DELETE => &[Operation::Del],
        _ => &[],
    };
    candidates
        .iter()
        .copied()
        .find(|op| registered.contains(op.permission()))
}

/// The methods that resolve for `registered`, in the order GET, POST, PUT,
/// DELETE. This is the `Allow` enumeration of a 405 response.
pub fn allowed_methods(registered: Permission) -> Vec<Method> {
    let mut allow = Vec::with_capacity(4);
    if registered.intersects(Permission::READ) {
        allow.push(Method::GET);
    }
    if registered.contains(Permission::POST) {
        allow.push(Method::POST);
    }
    if registered.contains(Permission::PUT) {
        allow.push(Method::PUT);
    }
    if registered.contains(Permission::DEL) {
        allow.push(Method::DELETE);
    }
    allow
}
