//! Trainer-to-course assignment service implementing [`TrainerAssignments`].
//!
//! A course holds at most one trainer. Assigning a new trainer replaces the
//! previous binding in a single repository call, which adapters execute
//! atomically.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AssignmentRemoval, CourseRepository, TrainerAssignmentRepository, TrainerAssignments,
    UserRepository,
};
use crate::domain::{CourseId, Error, TrainerAssignment, UserId};

/// Message returned when the exact pair is already bound.
pub(crate) const ALREADY_ASSIGNED: &str = "This trainer is already assigned to this course.";

/// Assignment management for the admin console.
#[derive(Clone)]
pub struct TrainerAssignmentService<U, C, A> {
    users: Arc<U>,
    courses: Arc<C>,
    assignments: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<U, C, A> TrainerAssignmentService<U, C, A> {
    /// Create the service over its repositories and a clock for assignment
    /// dates.
    pub fn new(
        users: Arc<U>,
        courses: Arc<C>,
        assignments: Arc<A>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            courses,
            assignments,
            clock,
        }
    }
}

#[async_trait]
impl<U, C, A> TrainerAssignments for TrainerAssignmentService<U, C, A>
where
    U: UserRepository,
    C: CourseRepository,
    A: TrainerAssignmentRepository,
{
    async fn assign(
        &self,
        trainer_id: UserId,
        course_id: CourseId,
    ) -> Result<TrainerAssignment, Error> {
        if self.assignments.exists(course_id, trainer_id).await? {
            return Err(Error::conflict(ALREADY_ASSIGNED));
        }
        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(Error::not_found(format!("course {course_id} not found")));
        }
        if self.users.find_by_id(trainer_id).await?.is_none() {
            return Err(Error::not_found(format!("trainer {trainer_id} not found")));
        }

        let today = self.clock.utc().date_naive();
        let assignment = self
            .assignments
            .replace_for_course(course_id, trainer_id, today)
            .await?;
        info!(%course_id, %trainer_id, "trainer assigned to course");
        Ok(assignment)
    }

    async fn for_course(&self, course_id: CourseId) -> Result<Vec<TrainerAssignment>, Error> {
        Ok(self.assignments.list_for_course(course_id).await?)
    }

    async fn for_trainer(&self, trainer_id: UserId) -> Result<Vec<TrainerAssignment>, Error> {
        Ok(self.assignments.list_for_trainer(trainer_id).await?)
    }

    async fn is_assigned(&self, course_id: CourseId, trainer_id: UserId) -> Result<bool, Error> {
        Ok(self.assignments.exists(course_id, trainer_id).await?)
    }

    async fn remove(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
    ) -> Result<AssignmentRemoval, Error> {
        let removed = self.assignments.delete(course_id, trainer_id).await?;
        info!(%course_id, %trainer_id, removed, "trainer assignment removal requested");
        Ok(AssignmentRemoval { removed })
    }
}

#[cfg(test)]
#[path = "assignment_service_tests.rs"]
mod tests;
