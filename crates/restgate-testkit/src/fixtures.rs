//! Test fixtures and helpers.
//!
//! Common setup code for dispatch tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderValue, Method, Request, Response};
use restgate::{DispatchHandler, OperationHandler};
use restgate_core::Operation;
use restgate_perms::{Authorizer, Permission};

/// Response header naming the fixture handler that served a request.
pub const HANDLED_BY: &str = "x-handled-by";

/// An operation handler that counts its calls and echoes the request body.
///
/// The response carries the handler's label in [`HANDLED_BY`]. Clones share
/// the call counter.
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    label: &'static str,
    calls: Arc<AtomicUsize>,
}

impl RecordingHandler {
    /// Create a handler reporting itself as `label`.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The label written to [`HANDLED_BY`].
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Number of requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OperationHandler<Bytes, Bytes> for RecordingHandler {
    fn handle(&self, request: Request<Bytes>) -> Response<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut response = Response::new(request.into_body());
        response
            .headers_mut()
            .insert(HANDLED_BY, HeaderValue::from_static(self.label));
        response
    }
}

/// An authorizer that grants a fixed set and counts its calls.
#[derive(Debug, Clone)]
pub struct CountingAuthorizer {
    granted: Permission,
    calls: Arc<AtomicUsize>,
}

impl CountingAuthorizer {
    /// Create an authorizer granting `granted` to every request.
    pub fn new(granted: Permission) -> Self {
        Self {
            granted,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times the authorizer ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<B> Authorizer<Request<B>> for CountingAuthorizer {
    fn authorize(&self, _request: &Request<B>) -> Permission {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.granted
    }
}

/// One recording handler per operation.
#[derive(Debug, Clone)]
pub struct TestFixture {
    pub list: RecordingHandler,
    pub post: RecordingHandler,
    pub get: RecordingHandler,
    pub put: RecordingHandler,
    pub del: RecordingHandler,
}

impl TestFixture {
    /// Create a fixture with fresh handlers labelled by operation name.
    pub fn new() -> Self {
        Self {
            list: RecordingHandler::new("list"),
            post: RecordingHandler::new("post"),
            get: RecordingHandler::new("get"),
            put: RecordingHandler::new("put"),
            del: RecordingHandler::new("del"),
        }
    }

    /// The recording handler for an operation.
    pub fn handler(&self, operation: Operation) -> &RecordingHandler {
        match operation {
            Operation::List => &self.list,
            Operation::Post => &self.post,
            Operation::Get => &self.get,
            Operation::Put => &self.put,
            Operation::Del => &self.del,
        }
    }

    /// Total calls across all handlers.
    pub fn total_calls(&self) -> usize {
        Operation::ALL
            .into_iter()
            .map(|op| self.handler(op).calls())
            .sum()
    }

    /// Build a dispatch handler with the slots in `registered` filled and
    /// the default authorizer.
    pub fn dispatch(&self, registered: Permission) -> DispatchHandler<Bytes, Bytes> {
        self.builder(registered).build()
    }

    /// Build a dispatch handler with the slots in `registered` filled and
    /// the given authorizer.
    pub fn dispatch_with(
        &self,
        registered: Permission,
        authorizer: impl Authorizer<Request<Bytes>> + 'static,
    ) -> DispatchHandler<Bytes, Bytes> {
        self.builder(registered).authorizer(authorizer).build()
    }

    fn builder(&self, registered: Permission) -> restgate::DispatchHandlerBuilder<Bytes, Bytes> {
        Operation::ALL
            .into_iter()
            .filter(|op| registered.contains(op.permission()))
            .fold(DispatchHandler::builder(), |builder, op| {
                builder.operation(op, Arc::new(self.handler(op).clone()))
            })
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a bodiless request.
pub fn request(method: Method, path: &str) -> Request<Bytes> {
    request_with_body(method, path, Bytes::new())
}

/// Build a request with a body.
pub fn request_with_body(method: Method, path: &str, body: impl Into<Bytes>) -> Request<Bytes> {
    let mut request = Request::new(body.into());
    *request.method_mut() = method;
    if let Ok(uri) = path.parse() {
        *request.uri_mut() = uri;
    }
    request
}

/// Values of every `Allow` header entry, in order.
pub fn allow_header(response: &Response<Bytes>) -> Vec<String> {
    response
        .headers()
        .get_all(http::header::ALLOW)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(String::from)
        .collect()
}
