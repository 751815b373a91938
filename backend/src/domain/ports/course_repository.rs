//! Port abstraction for course persistence.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseFilter, CourseId, CourseStatus, PageRequest};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}" as InternalError,
    }
}

/// Course storage. Listings are ordered by `created_at` descending, then by
/// id descending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Fetch one course.
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// List courses, optionally restricted to one status, narrowed by `filter`.
    async fn list(
        &self,
        status: Option<CourseStatus>,
        filter: &CourseFilter,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// One page of courses with the given status.
    async fn page(
        &self,
        status: CourseStatus,
        request: PageRequest,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Count courses, optionally restricted to one status.
    async fn count(&self, status: Option<CourseStatus>) -> Result<u64, CourseRepositoryError>;

    /// Distinct non-blank categories across all courses, sorted.
    async fn categories(&self) -> Result<Vec<String>, CourseRepositoryError>;

    /// Insert a course from a validated draft.
    async fn create(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError>;

    /// Replace a course's fields; `None` when the id is unknown.
    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Delete a course and everything hanging off it; `false` when absent.
    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError>;
}
