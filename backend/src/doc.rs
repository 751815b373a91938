//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every admin and portal endpoint, the health probes,
//! the payload schemas and the session cookie security scheme. The document
//! backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::AssignmentRemoval;
use crate::domain::{
    AdminSummary, Certification, CertificationStatistics, Course, CourseLearner, CourseLevel,
    CourseMaterial, CourseStatistics, CourseStatus, CourseSummary, CourseWithTrainer,
    DashboardStats, Enrollment, EnrollmentDetail, EnrollmentHighlights, EnrollmentStatus, Error,
    ErrorCode, LearnerDashboardView, LearnerProfile, LearnerRosterEntry, LearningStatistics,
    ProgressOverview, Role, TrainerAssignment, TrainerContact, User,
};
use crate::inbound::http::admin_courses::{CourseRequest, MaterialRequest};
use crate::inbound::http::admin_enrollments::EnrollmentRequest;
use crate::inbound::http::courses::CatalogueResponse;
use crate::inbound::http::dashboard::{CertificationsResponse, MyCoursesResponse, ProfileResponse};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::login::{LoginRequest, SessionStatus};
use crate::inbound::http::trainer_assignments::AssignTrainerRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the admin API and learner portal.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "LearnHub API",
        description = "Course administration API and session-backed learner portal."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::admin_reporting::summary,
        crate::inbound::http::admin_reporting::learners,
        crate::inbound::http::admin_reporting::trainers,
        crate::inbound::http::admin_courses::list_courses,
        crate::inbound::http::admin_courses::create_course,
        crate::inbound::http::admin_courses::courses_with_trainers,
        crate::inbound::http::admin_courses::delete_material,
        crate::inbound::http::admin_courses::get_course,
        crate::inbound::http::admin_courses::update_course,
        crate::inbound::http::admin_courses::delete_course,
        crate::inbound::http::admin_courses::list_materials,
        crate::inbound::http::admin_courses::add_material,
        crate::inbound::http::admin_courses::course_learners,
        crate::inbound::http::admin_enrollments::list_enrollments,
        crate::inbound::http::admin_enrollments::create_enrollment,
        crate::inbound::http::admin_enrollments::course_enrollments,
        crate::inbound::http::admin_enrollments::get_enrollment,
        crate::inbound::http::admin_enrollments::update_enrollment,
        crate::inbound::http::admin_enrollments::delete_enrollment,
        crate::inbound::http::trainer_assignments::assign_trainer,
        crate::inbound::http::trainer_assignments::course_assignments,
        crate::inbound::http::trainer_assignments::trainer_assignments,
        crate::inbound::http::trainer_assignments::check_assignment,
        crate::inbound::http::trainer_assignments::remove_assignment,
        crate::inbound::http::login::session_status,
        crate::inbound::http::login::login,
        crate::inbound::http::login::logout,
        crate::inbound::http::courses::browse_courses,
        crate::inbound::http::courses::course_page,
        crate::inbound::http::courses::categories,
        crate::inbound::http::courses::enroll,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::dashboard::statistics,
        crate::inbound::http::dashboard::my_courses,
        crate::inbound::http::dashboard::certifications,
        crate::inbound::http::dashboard::profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Role,
        Course,
        CourseStatus,
        CourseLevel,
        CourseMaterial,
        Enrollment,
        EnrollmentStatus,
        EnrollmentDetail,
        CourseSummary,
        Certification,
        TrainerAssignment,
        AssignmentRemoval,
        AdminSummary,
        EnrollmentHighlights,
        LearnerRosterEntry,
        TrainerContact,
        CourseWithTrainer,
        CourseLearner,
        DashboardStats,
        ProgressOverview,
        CourseStatistics,
        CertificationStatistics,
        LearnerProfile,
        LearningStatistics,
        LearnerDashboardView,
        CourseRequest,
        MaterialRequest,
        EnrollmentRequest,
        AssignTrainerRequest,
        LoginRequest,
        SessionStatus,
        CatalogueResponse,
        MyCoursesResponse,
        CertificationsResponse,
        ProfileResponse,
        ProbeStatus,
    )),
    tags(
        (name = "admin", description = "Course, enrollment and trainer administration"),
        (name = "portal", description = "Learner portal backed by the session cookie"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).unwrap_or_else(|| panic!("{name} schema")) {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message"])]
    #[case("User", &["id", "email", "firstName"])]
    #[case("SessionStatus", &["loggedIn"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = schema_fields(name);
        for field in expected {
            assert!(
                fields.iter().any(|f| f == field),
                "{name} should have field '{field}', got {fields:?}"
            );
        }
    }

    #[rstest]
    #[case("/api/admin/courses")]
    #[case("/api/admin/trainers-courses/assign")]
    #[case("/courses/{id}/enroll")]
    #[case("/login")]
    #[case("/health/ready")]
    fn document_lists_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
