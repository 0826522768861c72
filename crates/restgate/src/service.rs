//! `tower_service::Service` adapter.
//!
//! Dispatch is synchronous, so the returned future is always ready and the
//! service never fails: rejections are ordinary 405 / 403 responses.

use std::convert::Infallible;
use std::future::{ready, Ready};
use std::task::{Context, Poll};

use http::{Request, Response};
use tower_service::Service;

use crate::dispatch::DispatchHandler;

impl<ReqB, ResB> Service<Request<ReqB>> for DispatchHandler<ReqB, ResB>
where
    ResB: From<&'static str>,
{
    type Response = Response<ResB>;
    type Error = Infallible;
    type Future = Ready<Result<Response<ResB>, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<ReqB>) -> Self::Future {
        ready(Ok(self.handle(request)))
    }
}
