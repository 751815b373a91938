//! Tests for the course catalogue service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    CourseRepositoryError, MockCourseRepository, MockEnrollmentRepository,
};
use crate::domain::{Enrollment, EnrollmentId, EnrollmentStatus, ErrorCode};
use crate::test_support::{sample_course, sample_date};

fn make_service(
    courses: MockCourseRepository,
    enrollments: MockEnrollmentRepository,
) -> CourseCatalogueService<MockCourseRepository, MockEnrollmentRepository> {
    CourseCatalogueService::new(Arc::new(courses), Arc::new(enrollments))
}

fn student() -> UserId {
    UserId::new(5).expect("valid id")
}

fn existing_enrollment(course_id: CourseId) -> Enrollment {
    Enrollment {
        id: EnrollmentId::new(1).expect("valid id"),
        student_id: student(),
        course_id,
        enrollment_date: sample_date(),
        completion_percentage: 0,
        score: None,
        status: EnrollmentStatus::Assigned,
    }
}

#[rstest]
#[case(None, false, EnrollmentEligibility::CourseNotFound)]
#[case(Some(CourseStatus::Upcoming), false, EnrollmentEligibility::CourseUnavailable)]
#[case(Some(CourseStatus::Archived), false, EnrollmentEligibility::CourseUnavailable)]
#[case(Some(CourseStatus::Active), true, EnrollmentEligibility::AlreadyEnrolled)]
#[case(Some(CourseStatus::Active), false, EnrollmentEligibility::Eligible)]
#[tokio::test]
async fn eligibility_reports_the_failing_rule(
    #[case] status: Option<CourseStatus>,
    #[case] enrolled: bool,
    #[case] expected: EnrollmentEligibility,
) {
    let course_id = CourseId::new(3).expect("valid id");
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .with(eq(course_id))
        .times(2)
        .returning(move |_| Ok(status.map(|status| sample_course(3, status))));
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_find_for_student_and_course()
        .returning(move |_, course_id| Ok(enrolled.then(|| existing_enrollment(course_id))));

    let service = make_service(courses, enrollments);
    let outcome = service
        .eligibility(student(), course_id)
        .await
        .expect("eligibility succeeds");

    assert_eq!(outcome, expected);
    assert_eq!(
        service
            .can_enroll(student(), course_id)
            .await
            .expect("can_enroll succeeds"),
        expected == EnrollmentEligibility::Eligible
    );
}

#[tokio::test]
async fn unavailable_course_skips_enrollment_lookup() {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_course(9, CourseStatus::Upcoming))));
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments.expect_find_for_student_and_course().never();

    let outcome = make_service(courses, enrollments)
        .eligibility(student(), CourseId::new(9).expect("valid id"))
        .await
        .expect("eligibility succeeds");
    assert_eq!(outcome, EnrollmentEligibility::CourseUnavailable);
}

#[tokio::test]
async fn page_carries_totals() {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_page()
        .return_once(|_, _| Ok(vec![sample_course(4, CourseStatus::Active)]));
    courses
        .expect_count()
        .with(eq(Some(CourseStatus::Active)))
        .return_once(|_| Ok(7));

    let request = PageRequest::new(1, 3).expect("valid page");
    let page = make_service(courses, MockEnrollmentRepository::new())
        .active_courses_page(request)
        .await
        .expect("page succeeds");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_items, 7);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn blank_search_lists_every_active_course() {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_list()
        .withf(|status, filter| {
            *status == Some(CourseStatus::Active) && *filter == CourseFilter::default()
        })
        .return_once(|_, _| Ok(vec![sample_course(1, CourseStatus::Active)]));

    let found = make_service(courses, MockEnrollmentRepository::new())
        .search_active("   ")
        .await
        .expect("search succeeds");
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn connection_failures_surface_as_service_unavailable() {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_categories()
        .return_once(|| Err(CourseRepositoryError::connection("pool exhausted")));

    let err = make_service(courses, MockEnrollmentRepository::new())
        .categories()
        .await
        .expect_err("categories fail");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
