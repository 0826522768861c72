//! Operation handlers.

use std::sync::Arc;

use http::{Request, Response};

/// Serves one operation (list, create, get, replace or delete) of a resource.
///
/// Any `Fn(Request<ReqB>) -> Response<ResB>` closure is an operation handler.
pub trait OperationHandler<ReqB, ResB>: Send + Sync {
    /// Handle a request that passed method resolution and authorization.
    fn handle(&self, request: Request<ReqB>) -> Response<ResB>;
}

impl<ReqB, ResB, F> OperationHandler<ReqB, ResB> for F
where
    F: Fn(Request<ReqB>) -> Response<ResB> + Send + Sync,
{
    fn handle(&self, request: Request<ReqB>) -> Response<ResB> {
        self(request)
    }
}

/// A handler shared between clones of a dispatch handler.
pub type SharedHandler<ReqB, ResB> = Arc<dyn OperationHandler<ReqB, ResB>>;
