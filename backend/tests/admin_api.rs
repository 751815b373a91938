//! Admin API behaviour over the in-memory store.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use learnhub::domain::{AdminSummary, Role, UserId};
use learnhub::inbound::http::test_utils::MemoryBackend;
use learnhub::server::build_app;
use rstest::rstest;
use serde_json::json;

mod support;

use support::{create_course, dependencies, json_body, login};

async fn login_user_id<S>(app: &S, email: &str) -> i64
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let cookie = login(app, email).await;
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri("/login")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    json_body(res).await["userId"].as_i64().expect("user id")
}

#[rstest]
#[actix_web::test]
async fn reassigning_a_course_keeps_a_single_trainer() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;
    let course_id = create_course(&app, json!({ "title": "Networking", "status": "active" })).await;
    let first = login_user_id(&app, "linus@example.org").await;
    let second = login_user_id(&app, "radia@example.org").await;

    for trainer in [first, second] {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/admin/trainers-courses/assign")
                .set_json(json!({ "trainerUserId": trainer, "courseId": course_id }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/admin/trainers-courses/course/{course_id}"))
            .to_request(),
    )
    .await;
    let assignments = json_body(res).await;
    let list = assignments.as_array().expect("assignment list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["trainerId"], json!(second));

    let check = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/admin/trainers-courses/check/{course_id}/{first}"))
            .to_request(),
    )
    .await;
    assert_eq!(json_body(check).await, json!(false));
}

#[rstest]
#[actix_web::test]
async fn assigning_the_same_trainer_twice_is_a_bad_request() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;
    let course_id = create_course(&app, json!({ "title": "Networking" })).await;
    let trainer = login_user_id(&app, "linus@example.org").await;
    let body = json!({ "trainerUserId": trainer, "courseId": course_id });

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/trainers-courses/assign")
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/trainers-courses/assign")
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let payload = json_body(second).await;
    assert_eq!(payload["code"], json!("invalid_request"));
    assert_eq!(
        payload["message"],
        json!("This trainer is already assigned to this course.")
    );
}

#[rstest]
#[actix_web::test]
async fn assigning_to_an_unknown_course_is_a_bad_request() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;
    let trainer = login_user_id(&app, "linus@example.org").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/trainers-courses/assign")
            .set_json(json!({ "trainerUserId": trainer, "courseId": 999 }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["code"], json!("invalid_request"));
}

#[rstest]
#[case(json!({ "courseId": 1 }), "trainerUserId")]
#[case(json!({ "trainerUserId": 1 }), "courseId")]
#[actix_web::test]
async fn assignment_requires_both_ids(#[case] body: serde_json::Value, #[case] field: &str) {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/trainers-courses/assign")
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload = json_body(res).await;
    assert_eq!(payload["code"], json!("invalid_request"));
    assert_eq!(payload["details"]["field"], json!(field));
}

#[rstest]
#[actix_web::test]
async fn deleting_a_material_is_idempotent() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;
    let course_id = create_course(&app, json!({ "title": "Compilers" })).await;

    let added = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/admin/courses/{course_id}/materials"))
            .set_json(json!({ "materialUrl": "https://example.org/slides.pdf" }))
            .to_request(),
    )
    .await;
    assert_eq!(added.status(), StatusCode::CREATED);
    let material_id = json_body(added).await["id"].as_i64().expect("material id");

    for _ in 0..2 {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/admin/courses/materials/{material_id}"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/admin/courses/{course_id}/materials"))
            .to_request(),
    )
    .await;
    assert_eq!(json_body(listed).await, json!([]));
}

#[rstest]
#[case("/api/admin/courses/0")]
#[case("/api/admin/courses/abc")]
#[actix_web::test]
async fn malformed_course_ids_are_bad_requests(#[case] uri: &str) {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn summary_counts_roles_and_active_courses() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(build_app(dependencies(&backend))).await;
    create_course(&app, json!({ "title": "Rust", "status": "active" })).await;
    create_course(&app, json!({ "title": "Go" })).await;
    login_user_id(&app, "ada@example.org").await;
    let trainer = login_user_id(&app, "linus@example.org").await;
    assert!(
        backend
            .store
            .grant_role(UserId::new(trainer).expect("valid id"), Role::Trainer)
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/admin/dashboard/summary")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let summary: AdminSummary = actix_test::read_body_json(res).await;

    insta::assert_json_snapshot!(summary, @r#"
    {
      "totalLearners": 2,
      "totalTrainers": 1,
      "totalCourses": 2,
      "activeCourses": 1
    }
    "#);
}
