//! Port for the multi-table read projections behind the admin rosters.

use async_trait::async_trait;

use crate::domain::{
    AdminSummary, CourseId, CourseLearner, CourseWithTrainer, LearnerRosterEntry,
    TrainerRosterEntry,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by roster query adapters.
    pub enum RosterQueryError {
        /// Repository connection could not be established.
        Connection { message: String } => "roster query connection failed: {message}" as ServiceUnavailable,
        /// Query failed during execution.
        Query { message: String } => "roster query failed: {message}" as InternalError,
    }
}

/// Read-only joins across users, roles, courses and enrollments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterQuery: Send + Sync {
    /// Headline counters.
    async fn summary(&self) -> Result<AdminSummary, RosterQueryError>;

    /// Student-role users, newest account first, with enrollment highlights.
    async fn learners(&self) -> Result<Vec<LearnerRosterEntry>, RosterQueryError>;

    /// Trainer-role users, newest account first.
    async fn trainers(&self) -> Result<Vec<TrainerRosterEntry>, RosterQueryError>;

    /// Every course with its assigned trainer, newest course first.
    async fn courses_with_trainers(&self) -> Result<Vec<CourseWithTrainer>, RosterQueryError>;

    /// Students enrolled in a course, latest enrollment first.
    async fn course_learners(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseLearner>, RosterQueryError>;
}
