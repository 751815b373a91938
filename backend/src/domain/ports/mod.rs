//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`RosterQuery`]) are implemented by the
//! outbound adapters. Driving ports are implemented by the domain services
//! and consumed by the HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_reporting;
mod certification_repository;
mod course_administration;
mod course_catalogue;
mod course_material_repository;
mod course_repository;
mod enrollment_administration;
mod enrollment_repository;
mod learner_accounts;
mod learner_dashboard;
mod learner_enrollment;
mod roster_query;
mod trainer_assignment_repository;
mod trainer_assignments;
mod user_repository;

pub use admin_reporting::AdminReporting;
#[cfg(test)]
pub use admin_reporting::MockAdminReporting;
pub use certification_repository::{CertificationRepository, CertificationRepositoryError};
#[cfg(test)]
pub use certification_repository::MockCertificationRepository;
pub use course_administration::{CourseAdministration, MaterialRemoval};
#[cfg(test)]
pub use course_administration::MockCourseAdministration;
pub use course_catalogue::CourseCatalogue;
#[cfg(test)]
pub use course_catalogue::MockCourseCatalogue;
pub use course_material_repository::{CourseMaterialRepository, CourseMaterialRepositoryError};
#[cfg(test)]
pub use course_material_repository::MockCourseMaterialRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use enrollment_administration::EnrollmentAdministration;
#[cfg(test)]
pub use enrollment_administration::MockEnrollmentAdministration;
pub use enrollment_repository::{EnrollmentRepository, EnrollmentRepositoryError};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use learner_accounts::LearnerAccounts;
#[cfg(test)]
pub use learner_accounts::MockLearnerAccounts;
pub use learner_dashboard::LearnerDashboard;
#[cfg(test)]
pub use learner_dashboard::MockLearnerDashboard;
pub use learner_enrollment::LearnerEnrollment;
#[cfg(test)]
pub use learner_enrollment::MockLearnerEnrollment;
#[cfg(test)]
pub use roster_query::MockRosterQuery;
pub use roster_query::{RosterQuery, RosterQueryError};
#[cfg(test)]
pub use trainer_assignment_repository::MockTrainerAssignmentRepository;
pub use trainer_assignment_repository::{
    TrainerAssignmentRepository, TrainerAssignmentRepositoryError,
};
#[cfg(test)]
pub use trainer_assignments::MockTrainerAssignments;
pub use trainer_assignments::{AssignmentRemoval, TrainerAssignments};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
