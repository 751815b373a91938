//! Port abstraction for trainer-to-course assignment persistence.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{CourseId, TrainerAssignment, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by trainer assignment adapters.
    pub enum TrainerAssignmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "trainer assignment repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "trainer assignment repository query failed: {message}" as InternalError,
        /// A concurrent writer claimed the course first.
        Duplicate { course_id: CourseId } =>
            "course {course_id} was assigned concurrently" as Conflict,
    }
}

/// Assignment storage. A course holds at most one assignment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainerAssignmentRepository: Send + Sync {
    /// Whether the exact (course, trainer) pair exists.
    async fn exists(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
    ) -> Result<bool, TrainerAssignmentRepositoryError>;

    /// Atomically drop every assignment for the course and insert the new one.
    async fn replace_for_course(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
        assignment_date: NaiveDate,
    ) -> Result<TrainerAssignment, TrainerAssignmentRepositoryError>;

    /// Assignments for one course.
    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<TrainerAssignment>, TrainerAssignmentRepositoryError>;

    /// Assignments held by one trainer, newest first.
    async fn list_for_trainer(
        &self,
        trainer_id: UserId,
    ) -> Result<Vec<TrainerAssignment>, TrainerAssignmentRepositoryError>;

    /// Delete the pair; `false` when it did not exist.
    async fn delete(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
    ) -> Result<bool, TrainerAssignmentRepositoryError>;
}
