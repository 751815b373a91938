//! Driving port for enrollment administration.

use async_trait::async_trait;

use crate::domain::{CourseId, Enrollment, EnrollmentDraft, EnrollmentId, Error};

/// Enrollment CRUD for administrators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentAdministration: Send + Sync {
    /// Every enrollment, newest first.
    async fn list(&self) -> Result<Vec<Enrollment>, Error>;

    /// One enrollment; `not_found` when missing.
    async fn get(&self, id: EnrollmentId) -> Result<Enrollment, Error>;

    /// Enrollments in one course, newest first.
    async fn for_course(&self, course_id: CourseId) -> Result<Vec<Enrollment>, Error>;

    /// Validate and store an enrollment.
    async fn create(&self, draft: EnrollmentDraft) -> Result<Enrollment, Error>;

    /// Validate and replace an enrollment.
    async fn update(&self, id: EnrollmentId, draft: EnrollmentDraft) -> Result<Enrollment, Error>;

    /// Delete an enrollment.
    async fn delete(&self, id: EnrollmentId) -> Result<(), Error>;
}
