//! Port abstraction for course material persistence.

use async_trait::async_trait;

use crate::domain::{CourseId, CourseMaterial, MaterialId, NewCourseMaterial};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course material adapters.
    pub enum CourseMaterialRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course material repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "course material repository query failed: {message}" as InternalError,
    }
}

/// Materials attached to courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseMaterialRepository: Send + Sync {
    /// Materials of a course, oldest first.
    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseMaterial>, CourseMaterialRepositoryError>;

    /// Attach a material to an existing course.
    async fn create(
        &self,
        course_id: CourseId,
        material: &NewCourseMaterial,
    ) -> Result<CourseMaterial, CourseMaterialRepositoryError>;

    /// Delete exactly one material; `false` when it did not exist.
    async fn delete(&self, id: MaterialId) -> Result<bool, CourseMaterialRepositoryError>;
}
