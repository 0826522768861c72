//! The per-path dispatch handler.
//!
//! A [`DispatchHandler`] bundles the operations registered on one path.
//! Register a handler with List and Post on a collection path (`/users`) and
//! one with Get, Put and Del on an item path (`/users/{id}`). If both List
//! and Get are set, GET always reaches Get.

use std::fmt;
use std::sync::Arc;

use http::{Method, Request, Response};
use restgate_core::{allowed_methods, decide, Decision, Operation};
use restgate_perms::{Authorizer, Everyone, Permission};

use crate::handler::{OperationHandler, SharedHandler};
use crate::response;

/// An authorizer over `http` requests, shared between clones.
pub type SharedAuthorizer<ReqB> = Arc<dyn Authorizer<Request<ReqB>>>;

/// Routes the methods of one path to up to five operation handlers.
///
/// On each request the handler:
///
/// 1. resolves the operation from the method, answering 405 with an `Allow`
///    list when nothing is registered for it;
/// 2. asks the authorizer for the caller's permissions, answering 403 when
///    the operation's bit is missing;
/// 3. forwards the request, unmodified, to the operation handler and returns
///    its response untouched.
///
/// Immutable once built. Clones share their handlers.
pub struct DispatchHandler<ReqB, ResB> {
    list: Option<SharedHandler<ReqB, ResB>>,
    post: Option<SharedHandler<ReqB, ResB>>,
    get: Option<SharedHandler<ReqB, ResB>>,
    put: Option<SharedHandler<ReqB, ResB>>,
    del: Option<SharedHandler<ReqB, ResB>>,
    authorizer: SharedAuthorizer<ReqB>,
}

impl<ReqB, ResB> DispatchHandler<ReqB, ResB> {
    /// Start building a dispatch handler.
    pub fn builder() -> DispatchHandlerBuilder<ReqB, ResB> {
        DispatchHandlerBuilder::new()
    }

    /// The handler registered for an operation.
    pub fn slot(&self, operation: Operation) -> Option<&SharedHandler<ReqB, ResB>> {
        match operation {
            Operation::List => self.list.as_ref(),
            Operation::Post => self.post.as_ref(),
            Operation::Get => self.get.as_ref(),
            Operation::Put => self.put.as_ref(),
            Operation::Del => self.del.as_ref(),
        }
    }

    /// The set of operations that have a handler.
    pub fn registered(&self) -> Permission {
        Operation::ALL
            .into_iter()
            .filter(|op| self.slot(*op).is_some())
            .fold(Permission::NONE, |set, op| set | op.permission())
    }

    /// The methods this path answers, in `Allow` order.
    pub fn allowed_methods(&self) -> Vec<Method> {
        allowed_methods(self.registered())
    }

    /// Decide what happens to `request` without running any handler.
    ///
    /// The authorizer runs only if an operation resolved.
    pub fn decide(&self, request: &Request<ReqB>) -> Decision {
        decide(request.method(), self.registered(), || {
            self.authorizer.authorize(request)
        })
    }

    /// Serve a request.
    pub fn handle(&self, request: Request<ReqB>) -> Response<ResB>
    where
        ResB: From<&'static str>,
    {
        match self.decide(&request) {
            Decision::Forward(operation) => {
                let Some(handler) = self.slot(operation) else {
                    return response::method_not_allowed(&self.allowed_methods());
                };
                tracing::trace!(
                    method = %request.method(),
                    path = request.uri().path(),
                    %operation,
                    "forwarding request"
                );
                handler.handle(request)
            }
            Decision::MethodNotAllowed { allow } => {
                tracing::debug!(
                    method = %request.method(),
                    path = request.uri().path(),
                    ?allow,
                    "method not allowed"
                );
                response::method_not_allowed(&allow)
            }
            Decision::Forbidden {
                operation,
                required,
                granted,
            } => {
                tracing::debug!(
                    method = %request.method(),
                    path = request.uri().path(),
                    %operation,
                    %required,
                    %granted,
                    "permission denied"
                );
                response::forbidden()
            }
        }
    }
}

impl<ReqB, ResB> Clone for DispatchHandler<ReqB, ResB> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            post: self.post.clone(),
            get: self.get.clone(),
            put: self.put.clone(),
            del: self.del.clone(),
            authorizer: Arc::clone(&self.authorizer),
        }
    }
}

impl<ReqB, ResB> fmt::Debug for DispatchHandler<ReqB, ResB> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchHandler")
            .field("registered", &self.registered())
            .finish_non_exhaustive()
    }
}

/// Builder for [`DispatchHandler`].
///
/// Every slot is optional. Without an authorizer, everyone may read and
/// no-one may write ([`Everyone::READ_ONLY`]).
pub struct DispatchHandlerBuilder<ReqB, ResB> {
    list: Option<SharedHandler<ReqB, ResB>>,
    post: Option<SharedHandler<ReqB, ResB>>,
    get: Option<SharedHandler<ReqB, ResB>>,
    put: Option<SharedHandler<ReqB, ResB>>,
    del: Option<SharedHandler<ReqB, ResB>>,
    authorizer: Option<SharedAuthorizer<ReqB>>,
}

impl<ReqB, ResB> DispatchHandlerBuilder<ReqB, ResB> {
    /// Create a builder with no handlers and the default authorizer.
    pub fn new() -> Self {
        Self {
            list: None,
            post: None,
            get: None,
            put: None,
            del: None,
            authorizer: None,
        }
    }

    /// List all elements of the collection.
    pub fn list(mut self, handler: impl OperationHandler<ReqB, ResB> + 'static) -> Self {
        self.list = Some(Arc::new(handler));
        self
    }

    /// Create a new element. Should typically return the created id or element.
    pub fn post(mut self, handler: impl OperationHandler<ReqB, ResB> + 'static) -> Self {
        self.post = Some(Arc::new(handler));
        self
    }

    /// Retrieve an element by its id.
    pub fn get(mut self, handler: impl OperationHandler<ReqB, ResB> + 'static) -> Self {
        self.get = Some(Arc::new(handler));
        self
    }

    /// Replace the element at a given id. Should typically return the
    /// updated element.
    pub fn put(mut self, handler: impl OperationHandler<ReqB, ResB> + 'static) -> Self {
        self.put = Some(Arc::new(handler));
        self
    }

    /// Delete the element at a given id.
    pub fn del(mut self, handler: impl OperationHandler<ReqB, ResB> + 'static) -> Self {
        self.del = Some(Arc::new(handler));
        self
    }

    /// Set the handler of one operation from a shared handler.
    pub fn operation(mut self, operation: Operation, handler: SharedHandler<ReqB, ResB>) -> Self {
        let slot = match operation {
            Operation::List => &mut self.list,
            Operation::Post => &mut self.post,
            Operation::Get => &mut self.get,
            Operation::Put => &mut self.put,
            Operation::Del => &mut self.del,
        };
        *slot = Some(handler);
        self
    }

    /// Set the function that computes a caller's permissions.
    pub fn authorizer(mut self, authorizer: impl Authorizer<Request<ReqB>> + 'static) -> Self {
        self.authorizer = Some(Arc::new(authorizer));
        self
    }

    /// Set an authorizer shared with other paths.
    pub fn shared_authorizer(mut self, authorizer: SharedAuthorizer<ReqB>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    /// Finish building.
    pub fn build(self) -> DispatchHandler<ReqB, ResB> {
        DispatchHandler {
            list: self.list,
            post: self.post,
            get: self.get,
            put: self.put,
            del: self.del,
            authorizer: self
                .authorizer
                .unwrap_or_else(|| Arc::new(Everyone::READ_ONLY)),
        }
    }
}

impl<ReqB, ResB> Default for DispatchHandlerBuilder<ReqB, ResB> {
    fn default() -> Self {
        Self::new()
    }
}
