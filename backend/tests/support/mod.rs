//! Shared harness for the HTTP integration suites.
//!
//! Every suite drives the production route table from
//! [`learnhub::server::build_app`] over the in-memory store.

#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use actix_http::Request;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceResponse},
    test as actix_test,
};
use learnhub::inbound::http::health::HealthState;
use learnhub::inbound::http::test_utils::{MemoryBackend, session_cookie};
use learnhub::server::AppDependencies;
use serde_json::{Value, json};

/// Application dependencies over `backend` with insecure cookies for tests.
pub fn dependencies(backend: &MemoryBackend) -> AppDependencies {
    let health_state = actix_web::web::Data::new(HealthState::new());
    health_state.mark_ready();
    AppDependencies {
        health_state,
        http_state: backend.state.clone(),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

/// Read a response body as JSON, `Value::Null` when empty.
pub async fn json_body(res: ServiceResponse<BoxBody>) -> Value {
    let bytes = actix_test::read_body(res).await;
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    }
}

/// Log in through the portal and return the session cookie.
pub async fn login<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email }))
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    session_cookie(&res)
}

/// Create a course through the admin API and return its id.
pub async fn create_course<S>(app: &S, body: Value) -> i64
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = actix_test::TestRequest::post()
        .uri("/api/admin/courses")
        .set_json(body)
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert_eq!(res.status().as_u16(), 201, "course creation failed");
    json_body(res).await["id"].as_i64().expect("course id")
}
