//! Rejection responses written by the dispatcher itself.
//!
//! Both use the usual plain-text error shape: a short message body,
//! `text/plain` content type and `nosniff`.

use http::header::{ALLOW, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderValue, Method, Response, StatusCode};

/// Body of a 405 response.
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method not allowed.\n";

/// Body of a 403 response.
pub const FORBIDDEN_BODY: &str = "Permission denied.\n";

/// Build a 405 response with one `Allow` entry per method.
pub fn method_not_allowed<B>(allow: &[Method]) -> Response<B>
where
    B: From<&'static str>,
{
    let mut response = plain_error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_BODY);
    let headers = response.headers_mut();
    for method in allow {
        // Method names are always valid header values.
        if let Ok(value) = HeaderValue::from_str(method.as_str()) {
            headers.append(ALLOW, value);
        }
    }
    response
}

/// Build a 403 response.
pub fn forbidden<B>() -> Response<B>
where
    B: From<&'static str>,
{
    plain_error(StatusCode::FORBIDDEN, FORBIDDEN_BODY)
}

fn plain_error<B>(status: StatusCode, message: &'static str) -> Response<B>
where
    B: From<&'static str>,
{
    let mut response = Response::new(B::from(message));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}
