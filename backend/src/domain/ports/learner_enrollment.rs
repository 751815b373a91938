//! Driving port for self-service enrollment.

use async_trait::async_trait;

use crate::domain::{CourseId, Enrollment, Error, UserId};

/// Learner-initiated enrollment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearnerEnrollment: Send + Sync {
    /// Enroll a student in an active course.
    ///
    /// # Errors
    ///
    /// - `not_found` when the student or course is missing.
    /// - `invalid_request` when the course is not active.
    /// - `conflict` when the student is already enrolled.
    async fn enroll(&self, student_id: UserId, course_id: CourseId) -> Result<Enrollment, Error>;

    /// Whether the student holds an enrollment for the course.
    async fn is_enrolled(&self, student_id: UserId, course_id: CourseId) -> Result<bool, Error>;
}
