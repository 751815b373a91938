//! Read-only projections for the administrative rosters.
//!
//! Each projection flattens a user (or course) together with whichever
//! related rows the admin screens display. Where several enrollments compete
//! for "most recent", the later `enrollment_date` wins and equal dates fall
//! back to the higher enrollment id so results are stable across adapters.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Course, EnrollmentId, User, UserId};

/// Headline counters for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    /// Distinct users holding the Student role.
    pub total_learners: u64,
    /// Distinct users holding the Trainer role.
    pub total_trainers: u64,
    /// All courses regardless of status.
    pub total_courses: u64,
    /// Courses with status `active`.
    pub active_courses: u64,
}

/// One enrollment as seen by the learner roster.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentSnapshot {
    /// Enrollment key, the tie-breaker for equal dates.
    pub enrollment_id: EnrollmentId,
    /// Title of the enrolled course.
    pub course_title: String,
    /// Day of enrollment.
    pub enrollment_date: NaiveDate,
    /// Score recorded on the enrollment.
    pub score: Option<f64>,
}

/// Roster fields derived from a learner's enrollment history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentHighlights {
    /// Title of the most recent enrollment's course.
    pub current_course: Option<String>,
    /// Score of the most recent enrollment.
    pub score: Option<f64>,
    /// First day the learner enrolled in anything.
    pub earliest_enrollment_date: Option<NaiveDate>,
}

impl EnrollmentHighlights {
    /// Summarise a learner's enrollments.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use learnhub::domain::{EnrollmentHighlights, EnrollmentId, EnrollmentSnapshot};
    ///
    /// let day = NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date");
    /// let history = [
    ///     EnrollmentSnapshot {
    ///         enrollment_id: EnrollmentId::new(1).expect("id"),
    ///         course_title: "SQL".into(),
    ///         enrollment_date: day,
    ///         score: None,
    ///     },
    ///     EnrollmentSnapshot {
    ///         enrollment_id: EnrollmentId::new(2).expect("id"),
    ///         course_title: "Rust".into(),
    ///         enrollment_date: day,
    ///         score: Some(91.0),
    ///     },
    /// ];
    /// let highlights = EnrollmentHighlights::from_history(&history);
    /// assert_eq!(highlights.current_course.as_deref(), Some("Rust"));
    /// ```
    #[must_use]
    pub fn from_history(history: &[EnrollmentSnapshot]) -> Self {
        let latest = history
            .iter()
            .max_by_key(|entry| (entry.enrollment_date, entry.enrollment_id));
        Self {
            current_course: latest.map(|entry| entry.course_title.clone()),
            score: latest.and_then(|entry| entry.score),
            earliest_enrollment_date: history.iter().map(|entry| entry.enrollment_date).min(),
        }
    }
}

/// Learner roster row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearnerRosterEntry {
    /// The learner's account.
    #[serde(flatten)]
    pub user: User,
    /// Derived enrollment fields.
    #[serde(flatten)]
    pub highlights: EnrollmentHighlights,
}

/// Trainer roster row: the trainer's account fields.
pub type TrainerRosterEntry = User;

/// Contact fields of the trainer assigned to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainerContact {
    /// Trainer account key.
    pub user_id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address.
    pub email: String,
}

impl From<&User> for TrainerContact {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.to_string(),
        }
    }
}

/// Course row with its trainer, if one is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithTrainer {
    /// The course.
    #[serde(flatten)]
    pub course: Course,
    /// Assigned trainer.
    pub trainer: Option<TrainerContact>,
}

/// Student enrolled in a given course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseLearner {
    /// Student account key.
    pub user_id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address.
    pub email: String,
}

/// Order learners newest account first, breaking ties on the higher id.
pub fn sort_newest_users_first(users: &mut [User]) {
    users.sort_by_key(|user| Reverse((user.created_at, user.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn snapshot(id: i64, title: &str, day: u32, score: Option<f64>) -> EnrollmentSnapshot {
        EnrollmentSnapshot {
            enrollment_id: EnrollmentId::new(id).expect("valid id"),
            course_title: title.to_owned(),
            enrollment_date: NaiveDate::from_ymd_opt(2026, 1, day).expect("valid date"),
            score,
        }
    }

    #[rstest]
    fn empty_history_has_no_highlights() {
        assert_eq!(
            EnrollmentHighlights::from_history(&[]),
            EnrollmentHighlights::default()
        );
    }

    #[rstest]
    fn latest_date_wins_regardless_of_input_order() {
        let history = [
            snapshot(9, "Old", 3, Some(50.0)),
            snapshot(2, "New", 20, Some(80.0)),
            snapshot(5, "Middle", 10, None),
        ];
        let highlights = EnrollmentHighlights::from_history(&history);
        assert_eq!(highlights.current_course.as_deref(), Some("New"));
        assert_eq!(highlights.score, Some(80.0));
        assert_eq!(
            highlights.earliest_enrollment_date,
            NaiveDate::from_ymd_opt(2026, 1, 3)
        );
    }

    #[rstest]
    #[case(&[(3, "A"), (8, "B")], "B")]
    #[case(&[(8, "B"), (3, "A")], "B")]
    fn equal_dates_prefer_higher_enrollment_id(
        #[case] rows: &[(i64, &str)],
        #[case] expected: &str,
    ) {
        let history: Vec<_> = rows
            .iter()
            .map(|(id, title)| snapshot(*id, title, 15, None))
            .collect();
        let highlights = EnrollmentHighlights::from_history(&history);
        assert_eq!(highlights.current_course.as_deref(), Some(expected));
    }
}
