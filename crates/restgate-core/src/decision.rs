//! The dispatch decision.
//!
//! [`decide`] combines resolution and the permission check into one value the
//! transport layer turns into either a forwarded call or a rejection.

use http::{Method, StatusCode};
use restgate_perms::Permission;

use crate::operation::Operation;
use crate::resolve::{allowed_methods, resolve};

/// What to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Hand the request to the handler registered for this operation.
    Forward(Operation),

    /// No handler serves the method.
    MethodNotAllowed {
        /// Methods that would have resolved, in `Allow` order.
        allow: Vec<Method>,
    },

    /// A handler exists but the caller lacks its permission.
    Forbidden {
        /// The resolved operation.
        operation: Operation,
        /// The permission the operation requires.
        required: Permission,
        /// What the authorizer granted.
        granted: Permission,
    },
}

impl Decision {
    /// Whether the request goes on to an operation handler.
    pub fn is_forward(&self) -> bool {
        matches!(self, Decision::Forward(_))
    }

    /// The resolved operation, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Decision::Forward(op) | Decision::Forbidden { operation: op, .. } => Some(*op),
            Decision::MethodNotAllowed { .. } => None,
        }
    }

    /// Status of the rejection response, `None` when forwarding.
    pub fn rejection_status(&self) -> Option<StatusCode> {
        match self {
            Decision::Forward(_) => None,
            Decision::MethodNotAllowed { .. } => Some(StatusCode::METHOD_NOT_ALLOWED),
            Decision::Forbidden { .. } => Some(StatusCode::FORBIDDEN),
        }
    }
}

/// Decide how to handle a request with `method` on a path where the
/// `registered` operations have handlers.
///
/// `authorize` is called at most once, and only when an operation resolved.
/// Access requires every bit of the operation's permission to be granted.
pub fn decide<F>(method: &Method, registered: Permission, authorize: F) -> Decision
where
    F: FnOnce() -> Permission,
{
    let Some(operation) = resolve(method, registered) else {
        return Decision::MethodNotAllowed {
            allow: allowed_methods(registered),
        };
    };

    let required = operation.permission();
    let granted = authorize();
    if !granted.allows(required) {
        return Decision::Forbidden {
            operation,
            required,
            granted,
        };
    }

    Decision::Forward(operation)
}
