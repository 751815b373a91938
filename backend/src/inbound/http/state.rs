//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminReporting, CourseAdministration, CourseCatalogue, EnrollmentAdministration,
    LearnerAccounts, LearnerDashboard, LearnerEnrollment, TrainerAssignments,
};

/// Dependency bundle for HTTP handlers.
///
/// Built by [`crate::server::diesel_http_state`] or
/// [`crate::server::memory_http_state`].
#[derive(Clone)]
pub struct HttpState {
    /// Learner-facing course browsing and eligibility.
    pub catalogue: Arc<dyn CourseCatalogue>,
    /// Signup-on-login.
    pub accounts: Arc<dyn LearnerAccounts>,
    /// Self-service enrollment.
    pub enrollment: Arc<dyn LearnerEnrollment>,
    /// Learner dashboard aggregations.
    pub dashboard: Arc<dyn LearnerDashboard>,
    /// Admin rosters and counters.
    pub reporting: Arc<dyn AdminReporting>,
    /// Admin course and material CRUD.
    pub courses: Arc<dyn CourseAdministration>,
    /// Admin enrollment CRUD.
    pub enrollments: Arc<dyn EnrollmentAdministration>,
    /// Trainer-to-course assignment.
    pub assignments: Arc<dyn TrainerAssignments>,
}
