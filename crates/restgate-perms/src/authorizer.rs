//! Authorizers: functions from a request to the permissions it carries.
//!
//! An authorizer answers "which operations may this caller perform on the
//! resource this request targets". It sees the request only, never the
//! operation being attempted, and returns the whole granted set.
//!
//! The request type is a parameter so that this crate stays independent of
//! any particular HTTP stack.

use std::fmt;
use std::sync::Arc;

use crate::permission::Permission;

/// Computes the permissions granted to the caller of a request.
///
/// Any `Fn(&R) -> Permission` closure is an authorizer.
pub trait Authorizer<R: ?Sized>: Send + Sync {
    /// Return the set of operations the caller of `request` may perform.
    fn authorize(&self, request: &R) -> Permission;
}

impl<R: ?Sized, F> Authorizer<R> for F
where
    F: Fn(&R) -> Permission + Send + Sync,
{
    fn authorize(&self, request: &R) -> Permission {
        self(request)
    }
}

/// Grants the same permissions to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Everyone(pub Permission);

impl Everyone {
    /// The policy used when no authorizer is configured: everyone may read,
    /// no-one may write.
    pub const READ_ONLY: Self = Self(Permission::READ);

    /// The permissions this authorizer grants.
    pub const fn permission(&self) -> Permission {
        self.0
    }
}

impl Default for Everyone {
    fn default() -> Self {
        Self::READ_ONLY
    }
}

impl<R: ?Sized> Authorizer<R> for Everyone {
    fn authorize(&self, _request: &R) -> Permission {
        self.0
    }
}

/// Create an authorizer that always grants `permission`.
pub fn everyone(permission: Permission) -> Everyone {
    Everyone(permission)
}

/// Grants a permission if any of its member authorizers grants it.
///
/// Every member is called with the same request and the results are
/// unioned. With no members nothing is granted.
pub struct Any<R: ?Sized> {
    authorizers: Vec<Arc<dyn Authorizer<R>>>,
}

impl<R: ?Sized> Any<R> {
    /// Create an empty union, which grants nothing.
    pub fn new() -> Self {
        Self {
            authorizers: Vec::new(),
        }
    }

    /// Add a member authorizer.
    pub fn or(mut self, authorizer: impl Authorizer<R> + 'static) -> Self {
        self.authorizers.push(Arc::new(authorizer));
        self
    }

    /// Add an already shared member authorizer.
    pub fn or_shared(mut self, authorizer: Arc<dyn Authorizer<R>>) -> Self {
        self.authorizers.push(authorizer);
        self
    }

    /// Number of member authorizers.
    pub fn len(&self) -> usize {
        self.authorizers.len()
    }

    /// Whether there are no members.
    pub fn is_empty(&self) -> bool {
        self.authorizers.is_empty()
    }
}

impl<R: ?Sized> Default for Any<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized> Clone for Any<R> {
    fn clone(&self) -> Self {
        Self {
            authorizers: self.authorizers.clone(),
        }
    }
}

impl<R: ?Sized> fmt::Debug for Any<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any")
            .field("authorizers", &self.authorizers.len())
            .finish()
    }
}

impl<R: ?Sized> Authorizer<R> for Any<R> {
    fn authorize(&self, request: &R) -> Permission {
        self.authorizers
            .iter()
            .fold(Permission::NONE, |granted, a| granted | a.authorize(request))
    }
}

impl<R: ?Sized> FromIterator<Arc<dyn Authorizer<R>>> for Any<R> {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Authorizer<R>>>>(iter: I) -> Self {
        Self {
            authorizers: iter.into_iter().collect(),
        }
    }
}

/// Create an authorizer granting the union of what `authorizers` grant.
pub fn any<R, I>(authorizers: I) -> Any<R>
where
    R: ?Sized,
    I: IntoIterator<Item = Arc<dyn Authorizer<R>>>,
{
    authorizers.into_iter().collect()
}
