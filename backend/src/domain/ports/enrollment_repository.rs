//! Port abstraction for enrollment persistence.

use async_trait::async_trait;

use crate::domain::{
    CourseId, Enrollment, EnrollmentDetail, EnrollmentId, EnrollmentStatus, NewEnrollment, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "enrollment repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "enrollment repository query failed: {message}" as InternalError,
        /// The student already holds an enrollment for the course.
        Duplicate { student_id: UserId, course_id: CourseId } =>
            "student {student_id} is already enrolled in course {course_id}" as Conflict,
    }
}

/// Enrollment storage. Listings are newest `enrollment_date` first with the
/// higher id breaking ties.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Fetch one enrollment.
    async fn find_by_id(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Fetch the enrollment for a (student, course) pair.
    async fn find_for_student_and_course(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Every enrollment.
    async fn list(&self) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    /// Enrollments in one course.
    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    /// A student's enrollments joined with their courses, optionally by status.
    async fn details_for_student(
        &self,
        student_id: UserId,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<EnrollmentDetail>, EnrollmentRepositoryError>;

    /// Insert an enrollment; a taken (student, course) pair is `Duplicate`.
    async fn create(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Replace an enrollment; `None` when the id is unknown.
    async fn update(
        &self,
        id: EnrollmentId,
        enrollment: &NewEnrollment,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Delete an enrollment; `false` when absent.
    async fn delete(&self, id: EnrollmentId) -> Result<bool, EnrollmentRepositoryError>;
}
