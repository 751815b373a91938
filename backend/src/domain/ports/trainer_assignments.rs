//! Driving port for trainer-to-course assignment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CourseId, Error, TrainerAssignment, UserId};

/// Result of an idempotent assignment removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRemoval {
    /// Whether a row was actually removed.
    pub removed: bool,
}

/// Single-trainer-per-course assignment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainerAssignments: Send + Sync {
    /// Make `trainer_id` the only trainer of `course_id`.
    ///
    /// # Errors
    ///
    /// - `conflict` when the exact pair already exists.
    /// - `not_found` when the course or trainer is missing.
    async fn assign(
        &self,
        trainer_id: UserId,
        course_id: CourseId,
    ) -> Result<TrainerAssignment, Error>;

    /// Assignments for a course.
    async fn for_course(&self, course_id: CourseId) -> Result<Vec<TrainerAssignment>, Error>;

    /// Assignments held by a trainer.
    async fn for_trainer(&self, trainer_id: UserId) -> Result<Vec<TrainerAssignment>, Error>;

    /// Whether the exact pair exists.
    async fn is_assigned(&self, course_id: CourseId, trainer_id: UserId) -> Result<bool, Error>;

    /// Remove the pair. Removing a missing pair succeeds.
    async fn remove(&self, course_id: CourseId, trainer_id: UserId)
    -> Result<AssignmentRemoval, Error>;
}
