//! Tests for trainer assignment.

use std::sync::Arc;

use mockall::predicate::eq;

use super::*;
use crate::domain::ports::{
    MockCourseRepository, MockTrainerAssignmentRepository, MockUserRepository,
    TrainerAssignmentRepositoryError,
};
use crate::domain::{AssignmentId, CourseStatus, ErrorCode};
use crate::test_support::{FixedClock, sample_course, sample_date, sample_user};

type Service =
    TrainerAssignmentService<MockUserRepository, MockCourseRepository, MockTrainerAssignmentRepository>;

fn make_service(
    users: MockUserRepository,
    courses: MockCourseRepository,
    assignments: MockTrainerAssignmentRepository,
) -> Service {
    TrainerAssignmentService::new(
        Arc::new(users),
        Arc::new(courses),
        Arc::new(assignments),
        Arc::new(FixedClock::on(2026, 6, 15)),
    )
}

fn trainer() -> UserId {
    UserId::new(7).expect("valid id")
}

fn course() -> CourseId {
    CourseId::new(3).expect("valid id")
}

fn known_users() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_user(id.get(), "trainer@example.com"))));
    users
}

fn known_courses() -> MockCourseRepository {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_course(id.get(), CourseStatus::Active))));
    courses
}

#[tokio::test]
async fn assign_replaces_the_course_binding() {
    let mut assignments = MockTrainerAssignmentRepository::new();
    assignments.expect_exists().return_once(|_, _| Ok(false));
    assignments
        .expect_replace_for_course()
        .with(eq(course()), eq(trainer()), eq(sample_date()))
        .times(1)
        .return_once(|course_id, trainer_id, assignment_date| {
            Ok(TrainerAssignment {
                id: AssignmentId::new(1).expect("valid id"),
                trainer_id,
                course_id,
                assignment_date,
            })
        });

    let assignment = make_service(known_users(), known_courses(), assignments)
        .assign(trainer(), course())
        .await
        .expect("assign succeeds");
    assert_eq!(assignment.trainer_id, trainer());
    assert_eq!(assignment.assignment_date, sample_date());
}

#[tokio::test]
async fn assigning_the_same_pair_twice_is_a_conflict() {
    let mut assignments = MockTrainerAssignmentRepository::new();
    assignments.expect_exists().return_once(|_, _| Ok(true));
    assignments.expect_replace_for_course().never();

    let err = make_service(MockUserRepository::new(), MockCourseRepository::new(), assignments)
        .assign(trainer(), course())
        .await
        .expect_err("duplicate pair");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), ALREADY_ASSIGNED);
}

#[tokio::test]
async fn unknown_trainer_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));
    let mut assignments = MockTrainerAssignmentRepository::new();
    assignments.expect_exists().return_once(|_, _| Ok(false));
    assignments.expect_replace_for_course().never();

    let err = make_service(users, known_courses(), assignments)
        .assign(trainer(), course())
        .await
        .expect_err("missing trainer");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn racing_assignment_surfaces_as_conflict() {
    let mut assignments = MockTrainerAssignmentRepository::new();
    assignments.expect_exists().return_once(|_, _| Ok(false));
    assignments
        .expect_replace_for_course()
        .return_once(|course_id, _, _| Err(TrainerAssignmentRepositoryError::duplicate(course_id)));

    let err = make_service(known_users(), known_courses(), assignments)
        .assign(trainer(), course())
        .await
        .expect_err("concurrent writer won");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn removing_a_missing_pair_reports_false() {
    let mut assignments = MockTrainerAssignmentRepository::new();
    assignments.expect_delete().return_once(|_, _| Ok(false));

    let removal = make_service(MockUserRepository::new(), MockCourseRepository::new(), assignments)
        .remove(course(), trainer())
        .await
        .expect("remove is idempotent");
    assert!(!removal.removed);
}
