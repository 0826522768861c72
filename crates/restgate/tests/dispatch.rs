//! End-to-end dispatch behaviour over recording handlers.

use bytes::Bytes;
use http::{Method, StatusCode};
use proptest::prelude::*;
use restgate::{any, everyone, Authorizer, Decision, Operation, Permission};
use restgate_testkit::{
    allow_header, generators, request, request_with_body, CountingAuthorizer, TestFixture,
    HANDLED_BY,
};
use std::sync::Arc;

#[test]
fn test_list_and_post_collection() {
    let fixture = TestFixture::new();
    let handler = fixture.dispatch(Permission::LIST | Permission::POST);

    let response = handler.handle(request(Method::GET, "/orders"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[HANDLED_BY], "list");
    assert_eq!(
        handler.decide(&request(Method::GET, "/orders")),
        Decision::Forward(Operation::List)
    );

    let response = handler.handle(request(Method::DELETE, "/orders"));
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(allow_header(&response), vec!["GET", "POST"]);
    assert_eq!(fixture.total_calls(), 1);
}

#[test]
fn test_get_takes_precedence_over_list() {
    let fixture = TestFixture::new();
    let handler = fixture.dispatch(Permission::LIST | Permission::GET);

    let response = handler.handle(request(Method::GET, "/orders/7"));
    assert_eq!(response.headers()[HANDLED_BY], "get");
    assert_eq!(fixture.get.calls(), 1);
    assert_eq!(fixture.list.calls(), 0);

    // Only the Get bit counts once Get is registered.
    let handler = fixture.dispatch_with(Permission::LIST | Permission::GET, everyone(Permission::LIST));
    let response = handler.handle(request(Method::GET, "/orders/7"));
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(fixture.total_calls(), 1);
}

#[test]
fn test_default_policy_denies_writes() {
    let fixture = TestFixture::new();
    let handler = fixture.dispatch(Permission::PUT);

    let response = handler.handle(request(Method::PUT, "/orders/7"));
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.body(), &Bytes::from_static(b"Permission denied.\n"));
    assert_eq!(fixture.put.calls(), 0);
}

#[test]
fn test_everyone_all_reaches_delete_once() {
    let fixture = TestFixture::new();
    let handler = fixture.dispatch_with(Permission::DEL, everyone(Permission::ALL));

    let response = handler.handle(request_with_body(Method::DELETE, "/orders/7", "bye"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body(), &Bytes::from_static(b"bye"));
    assert_eq!(fixture.del.calls(), 1);
    assert_eq!(fixture.total_calls(), 1);
}

#[test]
fn test_request_forwarded_unmodified() {
    let fixture = TestFixture::new();
    let handler = restgate::DispatchHandler::builder()
        .post(|req: http::Request<Bytes>| {
            let echo = format!(
                "{} {} {}",
                req.method(),
                req.uri(),
                req.headers()["x-trace"].to_str().unwrap_or_default()
            );
            http::Response::new(Bytes::from(echo))
        })
        .authorizer(everyone(Permission::WRITE))
        .build();

    let mut req = request_with_body(Method::POST, "/orders?draft=1", "{}");
    req.headers_mut()
        .insert("x-trace", http::HeaderValue::from_static("abc"));
    let response = handler.handle(req);
    assert_eq!(response.body(), &Bytes::from("POST /orders?draft=1 abc"));
    assert_eq!(fixture.total_calls(), 0);
}

#[test]
fn test_authorizer_skipped_on_method_not_allowed() {
    let fixture = TestFixture::new();
    let auth = CountingAuthorizer::new(Permission::ALL);
    let handler = fixture.dispatch_with(Permission::GET, auth.clone());

    let response = handler.handle(request(Method::PATCH, "/orders/1"));
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(allow_header(&response), vec!["GET"]);
    assert_eq!(auth.calls(), 0);

    handler.handle(request(Method::GET, "/orders/1"));
    assert_eq!(auth.calls(), 1);
}

#[test]
fn test_empty_handler_rejects_everything() {
    let fixture = TestFixture::new();
    let handler = fixture.dispatch(Permission::NONE);

    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let response = handler.handle(request(method, "/nothing"));
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(allow_header(&response).is_empty());
    }
}

#[test]
fn test_any_combines_authorizers() {
    let fixture = TestFixture::new();
    let auth = any([
        Arc::new(everyone(Permission::LIST)) as Arc<dyn Authorizer<http::Request<Bytes>>>,
        Arc::new(CountingAuthorizer::new(Permission::POST))
            as Arc<dyn Authorizer<http::Request<Bytes>>>,
    ]);
    let handler = fixture.dispatch_with(Permission::LIST | Permission::POST, auth);

    assert_eq!(
        handler.handle(request(Method::GET, "/orders")).status(),
        StatusCode::OK
    );
    assert_eq!(
        handler.handle(request(Method::POST, "/orders")).status(),
        StatusCode::OK
    );
    assert_eq!(fixture.total_calls(), 2);
}

#[test]
fn test_concurrent_requests_share_one_handler() {
    let fixture = TestFixture::new();
    let handler = Arc::new(fixture.dispatch(Permission::READ));

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let handler = Arc::clone(&handler);
            scope.spawn(move || {
                for _ in 0..100 {
                    let response = handler.handle(request(Method::GET, "/orders"));
                    assert_eq!(response.status(), StatusCode::OK);
                }
            });
        }
    });

    assert_eq!(fixture.get.calls(), 800);
    assert_eq!(fixture.list.calls(), 0);
}

proptest! {
    #[test]
    fn test_handlers_run_only_when_allowed(
        registered in generators::permission(),
        granted in generators::permission(),
        method in generators::method(),
    ) {
        let fixture = TestFixture::new();
        let handler = fixture.dispatch_with(registered, everyone(granted));
        let response = handler.handle(request(method.clone(), "/r"));

        match restgate::core::resolve(&method, registered) {
            None => {
                prop_assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
                prop_assert_eq!(fixture.total_calls(), 0);
            }
            Some(op) if granted.allows(op.permission()) => {
                prop_assert_eq!(response.status(), StatusCode::OK);
                prop_assert_eq!(fixture.handler(op).calls(), 1);
                prop_assert_eq!(fixture.total_calls(), 1);
            }
            Some(_) => {
                prop_assert_eq!(response.status(), StatusCode::FORBIDDEN);
                prop_assert_eq!(fixture.total_calls(), 0);
            }
        }
    }

    #[test]
    fn test_allow_lists_exactly_resolvable_methods(registered in generators::permission()) {
        let fixture = TestFixture::new();
        let handler = fixture.dispatch(registered);
        let response = handler.handle(request(Method::OPTIONS, "/r"));

        let expected: Vec<String> = [Method::GET, Method::POST, Method::PUT, Method::DELETE]
            .into_iter()
            .filter(|m| restgate::core::resolve(m, registered).is_some())
            .map(|m| m.to_string())
            .collect();
        prop_assert_eq!(allow_header(&response), expected);
    }
}
