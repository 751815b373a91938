//! Certificates issued for enrollments, and trainer-to-course assignments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AssignmentId, CertificationId, CourseId, EnrollmentId, UserId};

/// Credential issued for one enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    /// Surrogate key.
    pub id: CertificationId,
    /// Enrollment the certificate was issued for; unique.
    pub enrollment_id: EnrollmentId,
    /// Certificate title.
    pub title: String,
    /// Issue day.
    pub issue_date: NaiveDate,
    /// Optional link to the rendered certificate.
    pub certificate_url: Option<String>,
}

/// Binding of a trainer to a course. A course has at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainerAssignment {
    /// Surrogate key.
    pub id: AssignmentId,
    /// Assigned trainer.
    pub trainer_id: UserId,
    /// Course being taught.
    pub course_id: CourseId,
    /// Day the assignment was made.
    pub assignment_date: NaiveDate,
}
