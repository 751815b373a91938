//! Enrollments, their lifecycle status and the eligibility rules for
//! creating one.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::course::UnknownVariant;
use super::{Course, CourseId, CourseLevel, CourseStatus, EnrollmentId, UserId};

/// Lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Enrolled but not started.
    #[default]
    Assigned,
    /// Work under way.
    InProgress,
    /// Finished.
    Completed,
    /// Past the course end without completion.
    Overdue,
}

impl EnrollmentStatus {
    /// Column value in `enrollments.status`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    /// Statuses shown in the dashboard's recent activity list.
    #[must_use]
    pub const fn is_recent_activity(self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress | Self::Completed)
    }
}

impl FromStr for EnrollmentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            _ => Err(UnknownVariant {
                kind: "enrollment status",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Surrogate key.
    pub id: EnrollmentId,
    /// Enrolled student.
    pub student_id: UserId,
    /// Target course.
    pub course_id: CourseId,
    /// Day the enrollment was made.
    pub enrollment_date: NaiveDate,
    /// Progress in percent, 0 to 100.
    pub completion_percentage: i32,
    /// Optional assessment score.
    pub score: Option<f64>,
    /// Lifecycle state.
    pub status: EnrollmentStatus,
}

/// Enrollment row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnrollment {
    /// Enrolled student.
    pub student_id: UserId,
    /// Target course.
    pub course_id: CourseId,
    /// Day the enrollment was made.
    pub enrollment_date: NaiveDate,
    /// Progress in percent.
    pub completion_percentage: i32,
    /// Optional assessment score.
    pub score: Option<f64>,
    /// Lifecycle state.
    pub status: EnrollmentStatus,
}

impl NewEnrollment {
    /// Fresh self-service enrollment: `assigned`, no progress, no score.
    #[must_use]
    pub const fn assigned(student_id: UserId, course_id: CourseId, today: NaiveDate) -> Self {
        Self {
            student_id,
            course_id,
            enrollment_date: today,
            completion_percentage: 0,
            score: None,
            status: EnrollmentStatus::Assigned,
        }
    }
}

/// Validation failures for [`EnrollmentDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentValidationError {
    /// Completion outside 0..=100.
    #[error("completionPercentage must be between 0 and 100, got {0}")]
    CompletionOutOfRange(i32),
    /// Score below zero or not a number.
    #[error("score must be a non-negative number")]
    InvalidScore,
}

impl EnrollmentValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::CompletionOutOfRange(_) => "completionPercentage",
            Self::InvalidScore => "score",
        }
    }
}

/// Administrative create/update payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentDraft {
    /// Enrolled student.
    pub student_id: UserId,
    /// Target course.
    pub course_id: CourseId,
    /// Defaults to today when absent.
    pub enrollment_date: Option<NaiveDate>,
    /// Progress in percent.
    pub completion_percentage: i32,
    /// Optional assessment score.
    pub score: Option<f64>,
    /// Lifecycle state.
    pub status: EnrollmentStatus,
}

impl EnrollmentDraft {
    /// Check progress and score bounds.
    pub fn validate(&self) -> Result<(), EnrollmentValidationError> {
        if !(0..=100).contains(&self.completion_percentage) {
            return Err(EnrollmentValidationError::CompletionOutOfRange(
                self.completion_percentage,
            ));
        }
        if self
            .score
            .is_some_and(|score| !score.is_finite() || score.is_sign_negative())
        {
            return Err(EnrollmentValidationError::InvalidScore);
        }
        Ok(())
    }

    /// Resolve the row to store, filling a missing date with `today`.
    #[must_use]
    pub fn into_new(self, today: NaiveDate) -> NewEnrollment {
        NewEnrollment {
            student_id: self.student_id,
            course_id: self.course_id,
            enrollment_date: self.enrollment_date.unwrap_or(today),
            completion_percentage: self.completion_percentage,
            score: self.score,
            status: self.status,
        }
    }
}

/// Course fields carried alongside an enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    /// Course title.
    pub title: String,
    /// Catalogue category.
    pub category: Option<String>,
    /// Publication state.
    pub status: CourseStatus,
    /// Difficulty band.
    pub level: Option<CourseLevel>,
    /// Length in weeks.
    pub duration_weeks: Option<i32>,
    /// Instructor display name.
    pub instructor_name: Option<String>,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            category: course.category.clone(),
            status: course.status,
            level: course.level,
            duration_weeks: course.duration_weeks,
            instructor_name: course.instructor_name.clone(),
        }
    }
}

/// Enrollment joined with the course fields the portal renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDetail {
    /// The enrollment row.
    #[serde(flatten)]
    pub enrollment: Enrollment,
    /// Joined course fields.
    pub course: CourseSummary,
}

/// Outcome of checking whether a student may enroll in a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentEligibility {
    /// Enrollment is permitted.
    Eligible,
    /// No course has the requested id.
    CourseNotFound,
    /// The course exists but is not active.
    CourseUnavailable,
    /// The student already holds an enrollment for the course.
    AlreadyEnrolled,
}

impl EnrollmentEligibility {
    /// Apply the rules in order: the course exists, it is active, and the
    /// student is not yet enrolled.
    ///
    /// # Examples
    /// ```
    /// use learnhub::domain::EnrollmentEligibility;
    ///
    /// assert_eq!(
    ///     EnrollmentEligibility::evaluate(None, false),
    ///     EnrollmentEligibility::CourseNotFound
    /// );
    /// ```
    #[must_use]
    pub fn evaluate(course: Option<&Course>, already_enrolled: bool) -> Self {
        match course {
            None => Self::CourseNotFound,
            Some(course) if !course.is_active() => Self::CourseUnavailable,
            Some(_) if already_enrolled => Self::AlreadyEnrolled,
            Some(_) => Self::Eligible,
        }
    }

    /// Whether enrollment may proceed.
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn course_with_status(status: CourseStatus) -> Course {
        let created = Utc
            .with_ymd_and_hms(2026, 2, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Course {
            id: CourseId::new(7).expect("valid id"),
            title: "Databases".to_owned(),
            category: None,
            description: None,
            prerequisites: None,
            start_date: None,
            end_date: None,
            max_capacity: None,
            status,
            level: None,
            duration_weeks: None,
            instructor_name: None,
            price: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[rstest]
    #[case(CourseStatus::Active, false, EnrollmentEligibility::Eligible)]
    #[case(CourseStatus::Active, true, EnrollmentEligibility::AlreadyEnrolled)]
    #[case(CourseStatus::Upcoming, false, EnrollmentEligibility::CourseUnavailable)]
    #[case(CourseStatus::Archived, true, EnrollmentEligibility::CourseUnavailable)]
    fn eligibility_follows_rule_order(
        #[case] status: CourseStatus,
        #[case] enrolled: bool,
        #[case] expected: EnrollmentEligibility,
    ) {
        let course = course_with_status(status);
        assert_eq!(
            EnrollmentEligibility::evaluate(Some(&course), enrolled),
            expected
        );
    }

    #[rstest]
    #[case(-1)]
    #[case(101)]
    fn completion_must_be_a_percentage(#[case] completion: i32) {
        let draft = EnrollmentDraft {
            student_id: UserId::new(1).expect("valid id"),
            course_id: CourseId::new(1).expect("valid id"),
            enrollment_date: None,
            completion_percentage: completion,
            score: None,
            status: EnrollmentStatus::InProgress,
        };
        let err = draft.validate().expect_err("out of range");
        assert_eq!(err.field(), "completionPercentage");
    }

    #[rstest]
    fn draft_defaults_date_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 4).expect("valid date");
        let draft = EnrollmentDraft {
            student_id: UserId::new(3).expect("valid id"),
            course_id: CourseId::new(4).expect("valid id"),
            enrollment_date: None,
            completion_percentage: 10,
            score: Some(7.5),
            status: EnrollmentStatus::InProgress,
        };
        assert_eq!(draft.into_new(today).enrollment_date, today);
    }

    #[rstest]
    #[case("in_progress", EnrollmentStatus::InProgress)]
    #[case("COMPLETED", EnrollmentStatus::Completed)]
    fn status_parses_column_values(#[case] raw: &str, #[case] expected: EnrollmentStatus) {
        assert_eq!(raw.parse::<EnrollmentStatus>(), Ok(expected));
    }

    #[rstest]
    fn detail_flattens_enrollment_fields() {
        let course = course_with_status(CourseStatus::Active);
        let detail = EnrollmentDetail {
            enrollment: Enrollment {
                id: EnrollmentId::new(11).expect("valid id"),
                student_id: UserId::new(2).expect("valid id"),
                course_id: course.id,
                enrollment_date: NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date"),
                completion_percentage: 40,
                score: None,
                status: EnrollmentStatus::InProgress,
            },
            course: CourseSummary::from(&course),
        };
        insta::assert_json_snapshot!(detail, @r#"
        {
          "id": 11,
          "studentId": 2,
          "courseId": 7,
          "enrollmentDate": "2026-03-05",
          "completionPercentage": 40,
          "score": null,
          "status": "in_progress",
          "course": {
            "title": "Databases",
            "category": null,
            "status": "active",
            "level": null,
            "durationWeeks": null,
            "instructorName": null
          }
        }
        "#);
    }
}
