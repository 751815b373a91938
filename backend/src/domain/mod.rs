//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed learning-platform entities used by the API
//! and persistence layers, the ports that connect them, and the services that
//! implement the driving ports. Keep types immutable and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload and category.
//! - Identifiers: `UserId`, `CourseId`, `EnrollmentId` and friends.
//! - Records: `User`, `Course`, `Enrollment`, `Certification`,
//!   `TrainerAssignment`, plus the roster and dashboard projections.
//! - Services: one per driving port in [`ports`].

pub mod dashboard;
pub mod error;
pub mod ports;

mod assignment_service;
mod catalogue_service;
mod certification;
mod course;
mod course_admin_service;
mod dashboard_service;
mod enrollment;
mod enrollment_admin_service;
mod ids;
mod reporting_service;
mod roster;
mod student_service;
mod trace_id;
mod user;

pub use self::assignment_service::TrainerAssignmentService;
pub use self::catalogue_service::CourseCatalogueService;
pub use self::certification::{Certification, TrainerAssignment};
pub use self::course::{
    Course, CourseDraft, CourseFilter, CourseLevel, CourseMaterial, CourseStatus,
    CourseValidationError, MAX_PAGE_SIZE, NewCourseMaterial, Page, PageRequest, PageSizeError,
    UnknownVariant,
};
pub use self::course_admin_service::CourseAdministrationService;
pub use self::dashboard::{
    CertificationStatistics, CourseStatistics, DashboardStats, LearnerDashboardView,
    LearnerProfile, LearningStatistics, ProgressOverview,
};
pub use self::dashboard_service::LearnerDashboardService;
pub use self::enrollment::{
    CourseSummary, Enrollment, EnrollmentDetail, EnrollmentDraft, EnrollmentEligibility,
    EnrollmentStatus, EnrollmentValidationError, NewEnrollment,
};
pub use self::enrollment_admin_service::EnrollmentAdministrationService;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{
    AssignmentId, CertificationId, CourseId, EnrollmentId, IdValidationError, MaterialId, UserId,
};
pub use self::reporting_service::AdminReportingService;
pub use self::roster::{
    AdminSummary, CourseLearner, CourseWithTrainer, EnrollmentHighlights, EnrollmentSnapshot,
    LearnerRosterEntry, TrainerContact, TrainerRosterEntry, sort_newest_users_first,
};
pub use self::student_service::StudentService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, EmailValidationError, NewUser, Role, UnknownRole, User};
