//! End-to-end learner portal flows over the in-memory store.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use learnhub::domain::TRACE_ID_HEADER;
use learnhub::inbound::http::test_utils::MemoryBackend;
use learnhub::server::build_app;
use rstest::rstest;
use serde_json::json;

mod support;

use support::{create_course, dependencies, json_body, login};

#[rstest]
#[actix_web::test]
async fn learner_logs_in_and_enrolls_once() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;
    let course_id = create_course(
        &app,
        json!({ "title": "Rust for Learners", "category": "Programming", "status": "active" }),
    )
    .await;
    let cookie = login(&app, "ada@example.org").await;

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/courses/{course_id}/enroll"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let enrollment = json_body(first).await;
    assert_eq!(enrollment["courseId"], json!(course_id));
    assert_eq!(enrollment["status"], json!("assigned"));
    assert_eq!(enrollment["enrollmentDate"], json!("2026-06-15"));

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/courses/{course_id}/enroll"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(second).await["code"], json!("conflict"));

    let catalogue = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/courses")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(catalogue.status(), StatusCode::OK);
    let body = json_body(catalogue).await;
    assert_eq!(body["enrolledCourseIds"], json!([course_id]));
    assert_eq!(body["categories"], json!(["Programming"]));
    assert_eq!(body["selectedCategory"], json!("all"));
    assert_eq!(backend.store.user_count(), 1);
}

#[rstest]
#[case("upcoming", StatusCode::BAD_REQUEST)]
#[case("archived", StatusCode::BAD_REQUEST)]
#[case("active", StatusCode::OK)]
#[actix_web::test]
async fn only_active_courses_accept_enrollment(
    #[case] status: &str,
    #[case] expected: StatusCode,
) {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;
    let course_id = create_course(&app, json!({ "title": "Databases", "status": status })).await;
    let cookie = login(&app, "grace@example.org").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/courses/{course_id}/enroll"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn enrolling_in_a_missing_course_is_not_found() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;
    let cookie = login(&app, "ada@example.org").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/courses/999/enroll")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res).await["code"], json!("not_found"));
}

#[rstest]
#[case("/dashboard")]
#[case("/my-courses")]
#[case("/certifications")]
#[case("/profile")]
#[case("/courses")]
#[actix_web::test]
async fn portal_pages_require_a_session(#[case] uri: &str) {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
        .expect("trace id header");
    let body = json_body(res).await;
    assert_eq!(body["code"], json!("unauthorized"));
    assert_eq!(body["traceId"], json!(trace_id));
}

#[rstest]
#[actix_web::test]
async fn logout_clears_the_session() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;
    let cookie = login(&app, "ada@example.org").await;

    let status = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/login")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(json_body(status).await["loggedIn"], json!(true));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, json!({ "loggedIn": false }));
}

#[rstest]
#[actix_web::test]
async fn invalid_email_is_rejected_without_creating_an_account() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": "not-an-email" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(res).await["message"],
        json!("Please enter a valid email address.")
    );
    assert_eq!(backend.store.user_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn health_probes_report_ready() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;

    for uri in ["/health/ready", "/health/live"] {
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
        assert_eq!(json_body(res).await, json!({ "status": "ok" }));
    }
}
