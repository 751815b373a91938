//! Learner dashboard aggregation.
//!
//! Every function here is pure: it takes rows the service already fetched
//! plus the current day and derives the figures the portal shows. Nothing is
//! cached or computed incrementally.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Certification, Course, EnrollmentDetail, EnrollmentStatus, User};

/// Entries shown in the dashboard's recent enrollments panel.
pub const RECENT_ENROLLMENTS_LIMIT: usize = 5;
/// Entries shown in the dashboard's recent certifications panel.
pub const RECENT_CERTIFICATIONS_LIMIT: usize = 3;
/// Entries shown in the dashboard's recommendations panel.
pub const RECOMMENDED_COURSES_LIMIT: usize = 4;

const ACTIVITY_WINDOW_DAYS: u64 = 30;
const HOURS_PER_WEEK: i64 = 2;
const DEFAULT_COURSE_HOURS: i64 = 8;
const DEFAULT_CATEGORY: &str = "General";
const NO_CERTIFICATION: &str = "None";

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

fn count_status(enrollments: &[EnrollmentDetail], status: EnrollmentStatus) -> u64 {
    enrollments
        .iter()
        .filter(|detail| detail.enrollment.status == status)
        .count() as u64
}

fn within_activity_window(date: NaiveDate, today: NaiveDate) -> bool {
    today
        .checked_sub_days(Days::new(ACTIVITY_WINDOW_DAYS))
        .is_none_or(|cutoff| date > cutoff)
}

/// Headline counters for a learner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Active courses in the catalogue.
    pub total_courses: u64,
    /// All of the learner's enrollments.
    pub enrolled_courses: u64,
    /// Enrollments with status `completed`.
    pub completed_courses: u64,
    /// Enrollments with status `in_progress`.
    pub in_progress_courses: u64,
    /// Enrollments with status `assigned`.
    pub assigned_courses: u64,
    /// Certificates issued to the learner.
    pub certifications_earned: u64,
    /// Completed over enrolled, as a percentage with two decimals.
    pub completion_rate: f64,
}

impl DashboardStats {
    /// Derive counters from the learner's enrollments.
    ///
    /// # Examples
    /// ```
    /// use learnhub::domain::DashboardStats;
    ///
    /// let stats = DashboardStats::compute(12, &[], 0);
    /// assert_eq!(stats.total_courses, 12);
    /// assert_eq!(stats.completion_rate, 0.0);
    /// ```
    #[must_use]
    pub fn compute(
        active_courses: u64,
        enrollments: &[EnrollmentDetail],
        certifications_earned: u64,
    ) -> Self {
        let completed = count_status(enrollments, EnrollmentStatus::Completed);
        Self {
            total_courses: active_courses,
            enrolled_courses: enrollments.len() as u64,
            completed_courses: completed,
            in_progress_courses: count_status(enrollments, EnrollmentStatus::InProgress),
            assigned_courses: count_status(enrollments, EnrollmentStatus::Assigned),
            certifications_earned,
            completion_rate: percentage(completed as usize, enrollments.len()),
        }
    }
}

/// Order enrollments newest first, breaking ties on the higher id.
pub fn sort_newest_enrollments_first(enrollments: &mut [EnrollmentDetail]) {
    enrollments.sort_by_key(|detail| {
        Reverse((detail.enrollment.enrollment_date, detail.enrollment.id))
    });
}

/// Order certifications newest first, breaking ties on the higher id.
pub fn sort_newest_certifications_first(certifications: &mut [Certification]) {
    certifications.sort_by_key(|certification| {
        Reverse((certification.issue_date, certification.id))
    });
}

/// Most recent enrollments that count as activity.
#[must_use]
pub fn recent_enrollments(enrollments: &[EnrollmentDetail], limit: usize) -> Vec<EnrollmentDetail> {
    let mut recent: Vec<_> = enrollments
        .iter()
        .filter(|detail| detail.enrollment.status.is_recent_activity())
        .cloned()
        .collect();
    sort_newest_enrollments_first(&mut recent);
    recent.truncate(limit);
    recent
}

/// Most recently issued certificates.
#[must_use]
pub fn recent_certifications(certifications: &[Certification], limit: usize) -> Vec<Certification> {
    let mut recent = certifications.to_vec();
    sort_newest_certifications_first(&mut recent);
    recent.truncate(limit);
    recent
}

/// Active courses the learner is not enrolled in, keeping catalogue order.
///
/// `active_courses` is expected newest first, as the catalogue lists them.
#[must_use]
pub fn recommended_courses(
    active_courses: &[Course],
    enrollments: &[EnrollmentDetail],
    limit: usize,
) -> Vec<Course> {
    let enrolled: HashSet<_> = enrollments
        .iter()
        .map(|detail| detail.enrollment.course_id)
        .collect();
    active_courses
        .iter()
        .filter(|course| !enrolled.contains(&course.id))
        .take(limit)
        .cloned()
        .collect()
}

/// Progress panel figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOverview {
    /// Whether the learner has any enrollment.
    pub has_enrollments: bool,
    /// Mean completion percentage, two decimals.
    pub average_progress: f64,
    /// Estimated study hours across all enrollments.
    pub total_hours: i64,
    /// Enrollments made in the last 30 days.
    pub recent_activity: u64,
}

impl ProgressOverview {
    /// Summarise progress as of `today`.
    #[must_use]
    pub fn compute(enrollments: &[EnrollmentDetail], today: NaiveDate) -> Self {
        if enrollments.is_empty() {
            return Self::default();
        }
        let completion_sum: f64 = enrollments
            .iter()
            .map(|detail| f64::from(detail.enrollment.completion_percentage))
            .sum();
        let total_hours = enrollments
            .iter()
            .map(|detail| {
                detail
                    .course
                    .duration_weeks
                    .map_or(DEFAULT_COURSE_HOURS, |weeks| i64::from(weeks) * HOURS_PER_WEEK)
            })
            .sum();
        Self {
            has_enrollments: true,
            average_progress: round2(completion_sum / enrollments.len() as f64),
            total_hours,
            recent_activity: count_recent(enrollments, today),
        }
    }
}

fn count_recent(enrollments: &[EnrollmentDetail], today: NaiveDate) -> u64 {
    enrollments
        .iter()
        .filter(|detail| within_activity_window(detail.enrollment.enrollment_date, today))
        .count() as u64
}

/// Enrollment counts per status for the my-courses page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseStatistics {
    /// All enrollments.
    pub total: u64,
    /// Status `assigned`.
    pub assigned: u64,
    /// Status `in_progress`.
    pub in_progress: u64,
    /// Status `completed`.
    pub completed: u64,
    /// Status `overdue`.
    pub overdue: u64,
}

impl CourseStatistics {
    /// Count enrollments by status.
    #[must_use]
    pub fn compute(enrollments: &[EnrollmentDetail]) -> Self {
        Self {
            total: enrollments.len() as u64,
            assigned: count_status(enrollments, EnrollmentStatus::Assigned),
            in_progress: count_status(enrollments, EnrollmentStatus::InProgress),
            completed: count_status(enrollments, EnrollmentStatus::Completed),
            overdue: count_status(enrollments, EnrollmentStatus::Overdue),
        }
    }
}

/// Certificate counters for the certifications page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificationStatistics {
    /// All certificates.
    pub total: u64,
    /// Certificates issued in the current calendar year.
    pub this_year: u64,
    /// Latest issue date as `Mar 05, 2026`, or `None`.
    pub most_recent_date: String,
}

impl CertificationStatistics {
    /// Count certificates as of `today`.
    #[must_use]
    pub fn compute(certifications: &[Certification], today: NaiveDate) -> Self {
        let this_year = certifications
            .iter()
            .filter(|certification| certification.issue_date.year() == today.year())
            .count() as u64;
        let most_recent_date = certifications
            .iter()
            .map(|certification| certification.issue_date)
            .max()
            .map_or_else(
                || NO_CERTIFICATION.to_owned(),
                |date| date.format("%b %d, %Y").to_string(),
            );
        Self {
            total: certifications.len() as u64,
            this_year,
            most_recent_date,
        }
    }
}

/// Account fields plus the month the learner joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    /// The learner's account.
    #[serde(flatten)]
    pub user: User,
    /// Account creation month as `Jan 2026`.
    pub member_since: String,
}

impl From<User> for LearnerProfile {
    fn from(user: User) -> Self {
        let member_since = user.created_at.format("%b %Y").to_string();
        Self { user, member_since }
    }
}

/// Profile page statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningStatistics {
    /// Dashboard counters.
    #[serde(flatten)]
    pub stats: DashboardStats,
    /// Enrollments in the last 30 days.
    pub learning_streak: u64,
    /// Most common course category.
    pub favorite_category: String,
    /// Estimated hours studied, weighted by completion.
    pub total_learning_hours: i64,
}

impl LearningStatistics {
    /// Extend dashboard counters with profile metrics.
    #[must_use]
    pub fn compute(stats: DashboardStats, enrollments: &[EnrollmentDetail], today: NaiveDate) -> Self {
        Self {
            stats,
            learning_streak: count_recent(enrollments, today),
            favorite_category: favorite_category(enrollments),
            total_learning_hours: enrollments.iter().map(studied_hours).sum(),
        }
    }
}

/// Most frequent category; ties go to the alphabetically first name.
fn favorite_category(enrollments: &[EnrollmentDetail]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for category in enrollments
        .iter()
        .filter_map(|detail| detail.course.category.as_deref())
        .map(str::trim)
        .filter(|category| !category.is_empty())
    {
        *counts.entry(category).or_default() += 1;
    }
    counts
        .into_iter()
        .min_by_key(|(name, count)| (Reverse(*count), *name))
        .map_or_else(|| DEFAULT_CATEGORY.to_owned(), |(name, _)| name.to_owned())
}

/// Whole hours studied on one enrollment. Unknown durations count as zero.
fn studied_hours(detail: &EnrollmentDetail) -> i64 {
    detail.course.duration_weeks.map_or(0, |weeks| {
        i64::from(weeks) * HOURS_PER_WEEK * i64::from(detail.enrollment.completion_percentage) / 100
    })
}

/// Everything `GET /dashboard` renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearnerDashboardView {
    /// Headline counters.
    pub stats: DashboardStats,
    /// Latest enrollments.
    pub recent_enrollments: Vec<EnrollmentDetail>,
    /// Latest certificates.
    pub recent_certifications: Vec<Certification>,
    /// Suggested courses.
    pub recommended_courses: Vec<Course>,
    /// Progress panel.
    pub progress: ProgressOverview,
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
