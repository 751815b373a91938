//! Behavioural coverage for the in-memory store.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    CertificationRepository, CourseMaterialRepository, CourseRepository, EnrollmentRepository,
    EnrollmentRepositoryError, RosterQuery, TrainerAssignmentRepository, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    CourseDraft, CourseFilter, CourseId, CourseStatus, Email, NewCourseMaterial, NewEnrollment,
    NewUser, PageRequest,
};
use crate::test_support::{FixedClock, sample_date};

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new(Arc::new(FixedClock::on(2026, 6, 15)))
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, d).expect("valid date")
}

async fn add_user(store: &InMemoryStore, email: &str, role: Role) -> User {
    let new_user = NewUser {
        role,
        ..NewUser::learner_from_email(Email::new(email).expect("valid email"))
    };
    UserRepository::create(store, &new_user)
        .await
        .expect("user created")
}

async fn add_course(store: &InMemoryStore, title: &str, category: Option<&str>) -> Course {
    let draft = CourseDraft {
        title: title.to_owned(),
        category: category.map(str::to_owned),
        status: CourseStatus::Active,
        ..CourseDraft::default()
    };
    CourseRepository::create(store, &draft)
        .await
        .expect("course created")
}

#[rstest]
#[tokio::test]
async fn duplicate_enrollment_is_rejected_and_leaves_one_row(store: InMemoryStore) {
    let student = add_user(&store, "ada@example.org", Role::Student).await;
    let course = add_course(&store, "Rust", None).await;
    let enrollment = NewEnrollment::assigned(student.id, course.id, sample_date());

    EnrollmentRepository::create(&store, &enrollment)
        .await
        .expect("first enrollment");
    let err = EnrollmentRepository::create(&store, &enrollment)
        .await
        .expect_err("second enrollment");

    assert!(matches!(err, EnrollmentRepositoryError::Duplicate { .. }));
    let all = EnrollmentRepository::list(&store).await.expect("list");
    assert_eq!(all.len(), 1);
}

#[rstest]
#[tokio::test]
async fn reassigning_a_course_keeps_only_the_new_trainer(store: InMemoryStore) {
    let first = add_user(&store, "a@example.org", Role::Trainer).await;
    let second = add_user(&store, "b@example.org", Role::Trainer).await;
    let course = add_course(&store, "Rust", None).await;

    store
        .replace_for_course(course.id, first.id, day(1))
        .await
        .expect("first assignment");
    store
        .replace_for_course(course.id, second.id, day(2))
        .await
        .expect("second assignment");

    let rows = TrainerAssignmentRepository::list_for_course(&store, course.id)
        .await
        .expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].trainer_id, second.id);
    assert!(
        !store
            .exists(course.id, first.id)
            .await
            .expect("exists query")
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_course_cascades_to_dependants(store: InMemoryStore) {
    let student = add_user(&store, "ada@example.org", Role::Student).await;
    let trainer = add_user(&store, "tom@example.org", Role::Trainer).await;
    let course = add_course(&store, "Rust", None).await;
    let enrollment = EnrollmentRepository::create(
        &store,
        &NewEnrollment::assigned(student.id, course.id, sample_date()),
    )
    .await
    .expect("enrollment");
    store
        .issue_certification(enrollment.id, "Rust basics", day(10), None)
        .expect("certificate");
    CourseMaterialRepository::create(
        &store,
        course.id,
        &NewCourseMaterial {
            material_url: "https://example.org/slides".into(),
            material_description: None,
        },
    )
    .await
    .expect("material");
    store
        .replace_for_course(course.id, trainer.id, day(1))
        .await
        .expect("assignment");

    assert!(CourseRepository::delete(&store, course.id).await.expect("delete"));

    assert!(
        CourseMaterialRepository::list_for_course(&store, course.id)
            .await
            .expect("materials")
            .is_empty()
    );
    assert!(EnrollmentRepository::list(&store).await.expect("enrollments").is_empty());
    assert!(
        store
            .list_for_student(student.id)
            .await
            .expect("certs")
            .is_empty()
    );
    assert!(store.list_for_trainer(trainer.id).await.expect("assignments").is_empty());
}

#[rstest]
#[tokio::test]
async fn material_delete_is_idempotent(store: InMemoryStore) {
    let course = add_course(&store, "Rust", None).await;
    let material = NewCourseMaterial {
        material_url: "https://example.org/a".into(),
        material_description: None,
    };
    let kept = CourseMaterialRepository::create(&store, course.id, &material)
        .await
        .expect("kept");
    let doomed = CourseMaterialRepository::create(&store, course.id, &material)
        .await
        .expect("doomed");

    assert!(CourseMaterialRepository::delete(&store, doomed.id).await.expect("first delete"));
    assert!(!CourseMaterialRepository::delete(&store, doomed.id).await.expect("second delete"));

    let remaining = CourseMaterialRepository::list_for_course(&store, course.id)
        .await
        .expect("list");
    assert_eq!(remaining, vec![kept]);
}

#[rstest]
#[tokio::test]
async fn courses_created_in_the_same_instant_list_highest_id_first(store: InMemoryStore) {
    let first = add_course(&store, "First", None).await;
    let second = add_course(&store, "Second", None).await;

    let listed = CourseRepository::list(&store, None, &CourseFilter::default())
        .await
        .expect("list");
    let ids: Vec<CourseId> = listed.iter().map(|course| course.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let page = store
        .page(CourseStatus::Active, PageRequest::new(1, 1).expect("page"))
        .await
        .expect("page");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, first.id);
}

#[rstest]
#[tokio::test]
async fn categories_are_trimmed_sorted_and_distinct(store: InMemoryStore) {
    add_course(&store, "A", Some(" Data ")).await;
    add_course(&store, "B", Some("Cloud")).await;
    add_course(&store, "C", Some("Data")).await;
    add_course(&store, "D", Some("  ")).await;
    add_course(&store, "E", None).await;

    let categories = store.categories().await.expect("categories");
    assert_eq!(categories, vec!["Cloud".to_owned(), "Data".to_owned()]);
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_reported(store: InMemoryStore) {
    add_user(&store, "ada@example.org", Role::Student).await;
    let again = NewUser::learner_from_email(Email::new("ada@example.org").expect("email"));

    let err = UserRepository::create(&store, &again)
        .await
        .expect_err("duplicate");
    assert!(matches!(err, UserRepositoryError::DuplicateEmail { .. }));
    assert_eq!(store.user_count(), 1);
}

#[rstest]
#[tokio::test]
async fn learner_roster_uses_most_recent_enrollment(store: InMemoryStore) {
    let student = add_user(&store, "ada@example.org", Role::Student).await;
    add_user(&store, "tom@example.org", Role::Trainer).await;
    let older = add_course(&store, "Older", None).await;
    let newer = add_course(&store, "Newer", None).await;
    let tied = add_course(&store, "Tied", None).await;
    for (course, date, score) in [
        (&older, day(1), Some(40.0)),
        (&newer, day(9), Some(70.0)),
        (&tied, day(9), Some(95.0)),
    ] {
        let mut enrollment = NewEnrollment::assigned(student.id, course.id, date);
        enrollment.score = score;
        EnrollmentRepository::create(&store, &enrollment)
            .await
            .expect("enrollment");
    }

    let roster = store.learners().await.expect("roster");
    assert_eq!(roster.len(), 1);
    let highlights = &roster[0].highlights;
    assert_eq!(highlights.current_course.as_deref(), Some("Tied"));
    assert_eq!(highlights.score, Some(95.0));
    assert_eq!(highlights.earliest_enrollment_date, Some(day(1)));

    let summary = store.summary().await.expect("summary");
    assert_eq!(summary.total_learners, 1);
    assert_eq!(summary.total_trainers, 1);
    assert_eq!(summary.active_courses, 3);
}

#[rstest]
#[tokio::test]
async fn granted_roles_appear_in_both_rosters(store: InMemoryStore) {
    let user = add_user(&store, "ada@example.org", Role::Student).await;
    assert!(store.grant_role(user.id, Role::Trainer));
    assert!(!store.grant_role(UserId::new(99).expect("id"), Role::Trainer));

    assert_eq!(store.trainers().await.expect("trainers"), vec![user.clone()]);
    assert_eq!(store.learners().await.expect("learners").len(), 1);
}

#[rstest]
#[tokio::test]
async fn one_certificate_per_enrollment(store: InMemoryStore) {
    let student = add_user(&store, "ada@example.org", Role::Student).await;
    let course = add_course(&store, "Rust", None).await;
    let enrollment = EnrollmentRepository::create(
        &store,
        &NewEnrollment::assigned(student.id, course.id, sample_date()),
    )
    .await
    .expect("enrollment");

    assert!(
        store
            .issue_certification(enrollment.id, "Rust", day(20), None)
            .is_some()
    );
    assert!(
        store
            .issue_certification(enrollment.id, "Rust again", day(21), None)
            .is_none()
    );
    assert_eq!(
        store.list_for_student(student.id).await.expect("certs").len(),
        1
    );
}
