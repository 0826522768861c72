//! The five operations a resource path may support.

use std::fmt;

use http::Method;
use restgate_perms::Permission;

/// One of the five operations of a REST resource.
///
/// Each operation requires exactly its own permission bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List all elements of a collection.
    List,
    /// Create a new element.
    Post,
    /// Retrieve an element by id.
    Get,
    /// Replace an element at a given id.
    Put,
    /// Delete an element at a given id.
    Del,
}

impl Operation {
    /// All operations, in bit order.
    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::Post,
        Operation::Get,
        Operation::Put,
        Operation::Del,
    ];

    /// The permission this operation requires.
    pub const fn permission(self) -> Permission {
        match self {
            Operation::List => Permission::LIST,
            Operation::Post => Permission::POST,
            Operation::Get => Permission::GET,
            Operation::Put => Permission::PUT,
            Operation::Del => Permission::DEL,
        }
    }

    /// The HTTP method that reaches this operation.
    pub fn method(self) -> Method {
        match self {
            Operation::List | Operation::Get => Method::GET,
            Operation::Post => Method::POST,
            Operation::Put => Method::PUT,
            Operation::Del => Method::DELETE,
        }
    }

    /// Lowercase name, matching the permission text form.
    pub const fn name(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Post => "post",
            Operation::Get => "get",
            Operation::Put => "put",
            Operation::Del => "del",
        }
    }

    /// The operation owning a single permission bit.
    ///
    /// Returns `None` for the empty set and for composites.
    pub fn from_permission(permission: Permission) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.permission() == permission)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Operation> for Permission {
    fn from(op: Operation) -> Self {
        op.permission()
    }
}
