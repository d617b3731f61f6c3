//! End-to-end tests over the assembled router with in-memory repositories

use std::sync::Arc;

use api::app::build_router;
use auth::{AuthAppState, AuthConfig, MemoryAuthRepository};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use platform::request::{REQUEST_ID_HEADER, cors_layer};
use serde_json::{Value, json};
use tower::ServiceExt;
use works::{MemoryWorkRepository, WorksAppState};

struct TestApp {
    router: Router,
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

impl TestResponse {
    /// `name=value` part of the Set-Cookie header
    fn session_cookie(&self) -> String {
        let raw = self.headers[header::SET_COOKIE].to_str().unwrap();
        raw.split(';').next().unwrap().to_string()
    }
}

impl TestApp {
    fn new() -> Self {
        let auth_state = AuthAppState::new(
            Arc::new(MemoryAuthRepository::new()),
            Arc::new(AuthConfig::development()),
        );
        let works_state = WorksAppState::new(Arc::new(MemoryWorkRepository::new()));

        Self {
            router: build_router(auth_state, works_state, cors_layer(None)),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    async fn register(&self, email: &str, password: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/create-user",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Register and sign in, returning the session cookie
    async fn signed_in(&self, email: &str) -> String {
        assert_eq!(self.register(email, "secret").await.status, StatusCode::CREATED);
        let response = self
            .send(
                Method::POST,
                "/session",
                Some(json!({ "email": email, "password": "secret" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.session_cookie()
    }

    async fn create_work(&self, cookie: &str, creator: i64, name: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/private/create-work",
            Some(json!({
                "creator": creator,
                "name": name,
                "description": "",
                "links": ["https://docs.example/1"],
            })),
            Some(cookie),
        )
        .await
    }
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn register_sign_in_and_whoami() {
    let app = TestApp::new();

    let created = app.register("a@b.com", "secret").await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["id"], 1);
    assert_eq!(created.body["email"], "a@b.com");
    assert!(created.body.get("password").is_none());
    assert!(created.body.get("password_hash").is_none());

    let wrong = app
        .send(
            Method::POST,
            "/session",
            Some(json!({ "email": "a@b.com", "password": "wrong" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, json!({ "error": "incorrect email or password" }));

    let signed_in = app
        .send(
            Method::POST,
            "/session",
            Some(json!({ "email": "a@b.com", "password": "secret" })),
            None,
        )
        .await;
    assert_eq!(signed_in.status, StatusCode::OK);
    assert_eq!(signed_in.body, Value::Null);
    let cookie = signed_in.session_cookie();
    assert!(cookie.starts_with("check="));

    let whoami = app
        .send(Method::GET, "/private/whoami", None, Some(&cookie))
        .await;
    assert_eq!(whoami.status, StatusCode::OK);
    assert_eq!(whoami.body["id"], 1);
}

#[tokio::test]
async fn unknown_email_fails_like_wrong_password() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::POST,
            "/session",
            Some(json!({ "email": "nobody@b.com", "password": "secret" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "incorrect email or password");
}

#[tokio::test]
async fn duplicate_and_invalid_registration() {
    let app = TestApp::new();
    app.register("a@b.com", "secret").await;

    let duplicate = app.register("a@b.com", "other").await;
    assert_eq!(duplicate.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(duplicate.body["error"], "email already taken");

    let invalid = app.register("not-an-email", "").await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = invalid.body["error"].as_str().unwrap();
    assert!(message.contains("email"));
    assert!(message.contains("password"));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = TestApp::new();

    let request = Request::post("/create-user")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let app = TestApp::new();

    let whoami = app.send(Method::GET, "/private/whoami", None, None).await;
    assert_eq!(whoami.status, StatusCode::UNAUTHORIZED);
    assert_eq!(whoami.body, json!({ "error": "not authenticated" }));

    let forged = app
        .send(Method::GET, "/private/whoami", None, Some("check=forged.token"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    // Rejected before the body is even looked at, and nothing is created
    let create = app
        .send(
            Method::POST,
            "/private/create-work",
            Some(json!({ "creator": 1, "name": "sneaky work" })),
            None,
        )
        .await;
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);

    let listing = app.send(Method::GET, "/works/10/0", None, None).await;
    assert_eq!(listing.body, json!([]));
}

#[tokio::test]
async fn sign_out_ends_the_session() {
    let app = TestApp::new();
    let cookie = app.signed_in("a@b.com").await;

    let signed_out = app
        .send(Method::DELETE, "/session", None, Some(&cookie))
        .await;
    assert_eq!(signed_out.status, StatusCode::OK);
    let cleared = signed_out.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let whoami = app
        .send(Method::GET, "/private/whoami", None, Some(&cookie))
        .await;
    assert_eq!(whoami.status, StatusCode::UNAUTHORIZED);

    // Signing out again is harmless
    let again = app
        .send(Method::DELETE, "/session", None, Some(&cookie))
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn create_and_read_work() {
    let app = TestApp::new();
    let cookie = app.signed_in("a@b.com").await;

    let created = app.create_work(&cookie, 1, "my first work").await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(
        created.body,
        json!({
            "id": 1,
            "creator_id": 1,
            "name": "my first work",
            "links": ["https://docs.example/1"],
        })
    );

    let by_id = app.send(Method::GET, "/work/1", None, None).await;
    assert_eq!(by_id.status, StatusCode::OK);
    assert_eq!(by_id.body, created.body);

    let by_name = app
        .send(Method::GET, "/work-by-name/my%20first%20work", None, None)
        .await;
    assert_eq!(by_name.status, StatusCode::OK);
    assert_eq!(by_name.body, created.body);

    let missing = app.send(Method::GET, "/work/99", None, None).await;
    assert_eq!(missing.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(missing.body["error"], "record not found");
}

#[tokio::test]
async fn work_validation() {
    let app = TestApp::new();
    let cookie = app.signed_in("a@b.com").await;

    let short = app.create_work(&cookie, 1, "tiny").await;
    assert_eq!(short.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(short.body["error"].as_str().unwrap().starts_with("name:"));

    let long = app.create_work(&cookie, 1, &"x".repeat(101)).await;
    assert_eq!(long.status, StatusCode::UNPROCESSABLE_ENTITY);

    let someone_else = app.create_work(&cookie, 2, "valid name").await;
    assert_eq!(someone_else.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(someone_else.body["error"].as_str().unwrap().starts_with("creator:"));

    let listing = app.send(Method::GET, "/works/10/0", None, None).await;
    assert_eq!(listing.body, json!([]));
}

#[tokio::test]
async fn nul_characters_are_validation_errors() {
    let app = TestApp::new();

    let user = app.register("a\u{0}b@c.com", "secret").await;
    assert_eq!(user.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(user.body["error"].as_str().unwrap().starts_with("email:"));

    let cookie = app.signed_in("a@b.com").await;
    let work = app.create_work(&cookie, 1, "abc\u{0}def").await;
    assert_eq!(work.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(work.body["error"], "name: must not contain NUL characters");

    let search = app.send(Method::GET, "/works/10/0/ab%00c", None, None).await;
    assert_eq!(search.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn pagination_and_search() {
    let app = TestApp::new();
    let cookie = app.signed_in("a@b.com").await;

    for i in 1..=10 {
        let name = if i % 3 == 0 {
            format!("Cat picture {i}")
        } else {
            format!("dog picture {i}")
        };
        assert_eq!(app.create_work(&cookie, 1, &name).await.status, StatusCode::CREATED);
    }

    let first = app.send(Method::GET, "/works/5/0", None, None).await;
    let second = app.send(Method::GET, "/works/5/1", None, None).await;
    assert_eq!(ids(&first.body), vec![1, 2, 3, 4, 5]);
    assert_eq!(ids(&second.body), vec![6, 7, 8, 9, 10]);

    let cats = app.send(Method::GET, "/works/10/0/cat", None, None).await;
    assert_eq!(cats.status, StatusCode::OK);
    assert_eq!(ids(&cats.body), vec![3, 6, 9]);

    let bad_size = app.send(Method::GET, "/works/0/0", None, None).await;
    assert_eq!(bad_size.status, StatusCode::UNPROCESSABLE_ENTITY);
    let bad_index = app.send(Method::GET, "/works/5/-1", None, None).await;
    assert_eq!(bad_index.status, StatusCode::UNPROCESSABLE_ENTITY);
    let not_a_number = app.send(Method::GET, "/works/five/0", None, None).await;
    assert_eq!(not_a_number.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn only_the_creator_can_delete() {
    let app = TestApp::new();
    let owner = app.signed_in("owner@b.com").await;
    let other = app.signed_in("other@b.com").await;
    app.create_work(&owner, 1, "owned work").await;

    let denied = app
        .send(
            Method::POST,
            "/private/delete-work",
            Some(json!({ "creator": 2, "work": 1 })),
            Some(&other),
        )
        .await;
    assert_eq!(denied.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(denied.body["error"], "record not found");

    // Claiming the owner's id does not help
    let impersonated = app
        .send(
            Method::POST,
            "/private/delete-work",
            Some(json!({ "creator": 1, "work": 1 })),
            Some(&other),
        )
        .await;
    assert_eq!(impersonated.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(impersonated.body, denied.body);

    assert_eq!(app.send(Method::GET, "/work/1", None, None).await.status, StatusCode::OK);

    let deleted = app
        .send(
            Method::POST,
            "/private/delete-work",
            Some(json!({ "creator": 1, "work": 1 })),
            Some(&owner),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body, Value::Null);

    let again = app
        .send(
            Method::POST,
            "/private/delete-work",
            Some(json!({ "creator": 1, "work": 1 })),
            Some(&owner),
        )
        .await;
    assert_eq!(again.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn help_fallback_and_request_id() {
    let app = TestApp::new();

    let help = app.send(Method::GET, "/api/help", None, None).await;
    assert_eq!(help.status, StatusCode::OK);
    let paths: Vec<&str> = help
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/private/create-work"));

    let missing = app.send(Method::GET, "/no/such/route", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body, json!({ "error": "not found" }));

    let first = help.headers[REQUEST_ID_HEADER].to_str().unwrap().to_string();
    let second = missing.headers[REQUEST_ID_HEADER].to_str().unwrap().to_string();
    assert_ne!(first, second);
}
