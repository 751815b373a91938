//! Tests for learner dashboard aggregation.

use super::*;
use crate::domain::{
    CertificationId, CourseId, CourseStatus, CourseSummary, Email, Enrollment, EnrollmentId,
    UserId,
};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).expect("valid date")
}

fn detail(
    id: i64,
    course: i64,
    date: NaiveDate,
    status: EnrollmentStatus,
    completion: i32,
    category: Option<&str>,
    weeks: Option<i32>,
) -> EnrollmentDetail {
    EnrollmentDetail {
        enrollment: Enrollment {
            id: EnrollmentId::new(id).expect("valid id"),
            student_id: UserId::new(1).expect("valid id"),
            course_id: CourseId::new(course).expect("valid id"),
            enrollment_date: date,
            completion_percentage: completion,
            score: None,
            status,
        },
        course: CourseSummary {
            title: format!("Course {course}"),
            category: category.map(str::to_owned),
            status: CourseStatus::Active,
            level: None,
            duration_weeks: weeks,
            instructor_name: None,
        },
    }
}

fn course(id: i64) -> Course {
    let created = Utc
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    Course {
        id: CourseId::new(id).expect("valid id"),
        title: format!("Course {id}"),
        category: None,
        description: None,
        prerequisites: None,
        start_date: None,
        end_date: None,
        max_capacity: None,
        status: CourseStatus::Active,
        level: None,
        duration_weeks: None,
        instructor_name: None,
        price: None,
        created_at: created,
        updated_at: created,
    }
}

fn certification(id: i64, issued: NaiveDate) -> Certification {
    Certification {
        id: CertificationId::new(id).expect("valid id"),
        enrollment_id: EnrollmentId::new(id).expect("valid id"),
        title: format!("Certificate {id}"),
        issue_date: issued,
        certificate_url: None,
    }
}

#[fixture]
fn today() -> NaiveDate {
    day(6, 15)
}

#[fixture]
fn history() -> Vec<EnrollmentDetail> {
    vec![
        detail(1, 10, day(1, 5), EnrollmentStatus::Completed, 100, Some("Data"), Some(4)),
        detail(2, 11, day(6, 1), EnrollmentStatus::InProgress, 50, Some("Web"), Some(3)),
        detail(3, 12, day(6, 1), EnrollmentStatus::Assigned, 0, Some("Data"), None),
        detail(4, 13, day(5, 16), EnrollmentStatus::Overdue, 25, Some("Web"), Some(10)),
    ]
}

#[rstest]
fn completion_rate_is_zero_without_enrollments() {
    let stats = DashboardStats::compute(3, &[], 0);
    assert_eq!(stats.enrolled_courses, 0);
    assert!(stats.completion_rate.abs() < f64::EPSILON);
}

#[rstest]
fn completion_rate_rounds_to_two_decimals() {
    let enrollments = vec![
        detail(1, 1, day(1, 1), EnrollmentStatus::Completed, 100, None, None),
        detail(2, 2, day(1, 2), EnrollmentStatus::Assigned, 0, None, None),
        detail(3, 3, day(1, 3), EnrollmentStatus::InProgress, 10, None, None),
    ];
    let stats = DashboardStats::compute(5, &enrollments, 1);
    assert!((stats.completion_rate - 33.33).abs() < 1e-9);
    assert_eq!(stats.completed_courses, 1);
    assert_eq!(stats.assigned_courses, 1);
    assert_eq!(stats.in_progress_courses, 1);
    assert_eq!(stats.certifications_earned, 1);
}

#[rstest]
fn recent_enrollments_skip_overdue_and_break_date_ties_by_id(history: Vec<EnrollmentDetail>) {
    let recent = recent_enrollments(&history, 5);
    let ids: Vec<i64> = recent.iter().map(|d| d.enrollment.id.get()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(4)]
fn recommendations_exclude_enrolled_and_respect_limit(
    history: Vec<EnrollmentDetail>,
    #[case] limit: usize,
) {
    let catalogue: Vec<Course> = (10..=16).map(course).collect();
    let recommended = recommended_courses(&catalogue, &history, limit);
    assert!(recommended.len() <= limit);
    for course in &recommended {
        assert!(history.iter().all(|d| d.enrollment.course_id != course.id));
    }
    if limit > 0 {
        assert_eq!(recommended.first().map(|c| c.id.get()), Some(14));
    }
}

#[rstest]
fn progress_overview_estimates_hours_and_activity(
    history: Vec<EnrollmentDetail>,
    today: NaiveDate,
) {
    let progress = ProgressOverview::compute(&history, today);
    assert!(progress.has_enrollments);
    assert!((progress.average_progress - 43.75).abs() < 1e-9);
    // 4*2 + 3*2 + 8 (unknown duration) + 10*2
    assert_eq!(progress.total_hours, 42);
    // 16 May is exactly 30 days before 15 June and falls outside the window.
    assert_eq!(progress.recent_activity, 2);
}

#[rstest]
fn progress_overview_is_zero_without_enrollments(today: NaiveDate) {
    assert_eq!(ProgressOverview::compute(&[], today), ProgressOverview::default());
}

#[rstest]
fn course_statistics_count_every_status(history: Vec<EnrollmentDetail>) {
    let stats = CourseStatistics::compute(&history);
    assert_eq!(
        stats,
        CourseStatistics {
            total: 4,
            assigned: 1,
            in_progress: 1,
            completed: 1,
            overdue: 1,
        }
    );
}

#[rstest]
fn certification_statistics_format_latest_date(today: NaiveDate) {
    let certifications = vec![
        certification(1, NaiveDate::from_ymd_opt(2025, 11, 20).expect("valid date")),
        certification(2, day(3, 5)),
    ];
    let stats = CertificationStatistics::compute(&certifications, today);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.this_year, 1);
    assert_eq!(stats.most_recent_date, "Mar 05, 2026");
}

#[rstest]
fn certification_statistics_without_certificates(today: NaiveDate) {
    let stats = CertificationStatistics::compute(&[], today);
    assert_eq!(stats.most_recent_date, "None");
    assert_eq!(stats.this_year, 0);
}

#[rstest]
fn recent_certifications_are_newest_first() {
    let certifications = vec![
        certification(1, day(1, 1)),
        certification(2, day(4, 1)),
        certification(3, day(4, 1)),
        certification(4, day(2, 1)),
    ];
    let ids: Vec<i64> = recent_certifications(&certifications, 3)
        .iter()
        .map(|c| c.id.get())
        .collect();
    assert_eq!(ids, vec![3, 2, 4]);
}

#[rstest]
fn learning_statistics_pick_favourite_and_weight_hours(
    history: Vec<EnrollmentDetail>,
    today: NaiveDate,
) {
    let stats = DashboardStats::compute(7, &history, 0);
    let learning = LearningStatistics::compute(stats, &history, today);
    // Data and Web tie on two enrollments each.
    assert_eq!(learning.favorite_category, "Data");
    // 4*2*100/100 + 3*2*50/100 + 0 + 10*2*25/100
    assert_eq!(learning.total_learning_hours, 16);
    assert_eq!(learning.learning_streak, 2);
}

#[rstest]
fn favourite_category_defaults_to_general(today: NaiveDate) {
    let enrollments = vec![detail(1, 1, day(1, 1), EnrollmentStatus::Assigned, 0, None, None)];
    let learning = LearningStatistics::compute(DashboardStats::default(), &enrollments, today);
    assert_eq!(learning.favorite_category, "General");
}

#[rstest]
fn profile_reports_membership_month() {
    let created = Utc
        .with_ymd_and_hms(2025, 9, 30, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let user = User {
        id: UserId::new(4).expect("valid id"),
        email: Email::new("ada@example.org").expect("valid email"),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        phone_number: None,
        age: None,
        location: None,
        experience: None,
        created_at: created,
        updated_at: created,
    };
    let profile = LearnerProfile::from(user);
    assert_eq!(profile.member_since, "Sep 2025");
}
