//! A small orders API wired the way a server would wire it: one dispatch
//! handler per path, with role permissions loaded from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use restgate::{any, everyone, Authorizer, DispatchHandler, Permission, SharedAuthorizer};
use serde::Deserialize;

/// Role permissions as they appear in a config file.
#[derive(Debug, Deserialize)]
struct AccessConfig {
    public: Permission,
    roles: HashMap<String, Permission>,
}

const CONFIG: &str = r#"{
    "public": "read",
    "roles": {
        "member": "create | replace",
        "admin": "all"
    }
}"#;

/// Grants the permissions of the role named in `x-role`.
struct RoleAuthorizer {
    roles: HashMap<String, Permission>,
}

impl Authorizer<Request<Bytes>> for RoleAuthorizer {
    fn authorize(&self, request: &Request<Bytes>) -> Permission {
        request
            .headers()
            .get("x-role")
            .and_then(|v| v.to_str().ok())
            .and_then(|role| self.roles.get(role).copied())
            .unwrap_or(Permission::NONE)
    }
}

fn text(body: &'static str) -> impl Fn(Request<Bytes>) -> Response<Bytes> + Send + Sync {
    move |_req: Request<Bytes>| Response::new(Bytes::from_static(body.as_bytes()))
}

fn routes(config: AccessConfig) -> HashMap<&'static str, DispatchHandler<Bytes, Bytes>> {
    let auth: SharedAuthorizer<Bytes> = Arc::new(any([
        Arc::new(everyone(config.public)) as Arc<dyn Authorizer<Request<Bytes>>>,
        Arc::new(RoleAuthorizer {
            roles: config.roles,
        }) as Arc<dyn Authorizer<Request<Bytes>>>,
    ]));

    let mut routes = HashMap::new();
    routes.insert(
        "/api/v1/orders",
        DispatchHandler::builder()
            .list(text("all orders"))
            .post(text("order created"))
            .shared_authorizer(Arc::clone(&auth))
            .build(),
    );
    routes.insert(
        "/api/v1/orders/1",
        DispatchHandler::builder()
            .get(text("order 1"))
            .put(text("order 1 replaced"))
            .del(text("order 1 deleted"))
            .shared_authorizer(auth)
            .build(),
    );
    routes
}

fn serve(
    routes: &HashMap<&'static str, DispatchHandler<Bytes, Bytes>>,
    method: Method,
    path: &str,
    role: Option<&'static str>,
) -> anyhow::Result<Response<Bytes>> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(role) = role {
        builder = builder.header("x-role", role);
    }
    let request = builder.body(Bytes::new())?;
    let handler = routes
        .get(path)
        .ok_or_else(|| anyhow::anyhow!("no route for {path}"))?;
    Ok(handler.handle(request))
}

#[test]
fn test_orders_api() -> anyhow::Result<()> {
    let config: AccessConfig = serde_json::from_str(CONFIG)?;
    assert_eq!(config.roles["member"], Permission::POST | Permission::PUT);
    let routes = routes(config);

    // Anyone may read.
    let res = serve(&routes, Method::GET, "/api/v1/orders", None)?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body(), &Bytes::from_static(b"all orders"));

    let res = serve(&routes, Method::GET, "/api/v1/orders/1", None)?;
    assert_eq!(res.body(), &Bytes::from_static(b"order 1"));

    // Writing needs a role.
    let res = serve(&routes, Method::POST, "/api/v1/orders", None)?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = serve(&routes, Method::POST, "/api/v1/orders", Some("member"))?;
    assert_eq!(res.body(), &Bytes::from_static(b"order created"));

    // Members may replace but not delete.
    let res = serve(&routes, Method::PUT, "/api/v1/orders/1", Some("member"))?;
    assert_eq!(res.status(), StatusCode::OK);
    let res = serve(&routes, Method::DELETE, "/api/v1/orders/1", Some("member"))?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = serve(&routes, Method::DELETE, "/api/v1/orders/1", Some("admin"))?;
    assert_eq!(res.body(), &Bytes::from_static(b"order 1 deleted"));

    // Unknown roles fall back to public access.
    let res = serve(&routes, Method::DELETE, "/api/v1/orders/1", Some("intruder"))?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Collections do not take PUT, whatever the role.
    let res = serve(&routes, Method::PUT, "/api/v1/orders", Some("admin"))?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    let allow: Vec<_> = res.headers().get_all("allow").iter().collect();
    assert_eq!(allow, ["GET", "POST"]);

    Ok(())
}

#[test]
fn test_bad_config_is_rejected() {
    let err = serde_json::from_str::<AccessConfig>(r#"{"public": "read|sudo", "roles": {}}"#)
        .unwrap_err();
    assert!(err.to_string().contains("sudo"));
}
