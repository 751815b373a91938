//! Driving port for the admin dashboard and rosters.

use async_trait::async_trait;

use crate::domain::{
    AdminSummary, CourseId, CourseLearner, CourseWithTrainer, Error, LearnerRosterEntry,
    TrainerRosterEntry,
};

/// Read-only admin projections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminReporting: Send + Sync {
    /// Headline counters.
    async fn summary(&self) -> Result<AdminSummary, Error>;

    /// Learner roster.
    async fn learners(&self) -> Result<Vec<LearnerRosterEntry>, Error>;

    /// Trainer roster.
    async fn trainers(&self) -> Result<Vec<TrainerRosterEntry>, Error>;

    /// Courses with their trainer.
    async fn courses_with_trainers(&self) -> Result<Vec<CourseWithTrainer>, Error>;

    /// Students enrolled in a course; `not_found` when the course is missing.
    async fn course_learners(&self, course_id: CourseId) -> Result<Vec<CourseLearner>, Error>;
}
