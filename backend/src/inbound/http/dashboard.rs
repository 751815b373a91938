//! Learner portal dashboard, course list, certificates and profile.
//!
//! ```text
//! GET /dashboard
//! GET /dashboard/statistics
//! GET /my-courses?status=
//! GET /certifications
//! GET /profile
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Certification, CertificationStatistics, CourseStatistics, EnrollmentDetail, EnrollmentStatus,
    Error, LearnerDashboardView, LearnerProfile, LearningStatistics,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::AuthenticatedLearner;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional};

const STATUS: FieldName = FieldName::new("status");

/// Dashboard landing view.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = LearnerDashboardView),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["portal"],
    operation_id = "learnerDashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    learner: AuthenticatedLearner,
) -> ApiResult<web::Json<LearnerDashboardView>> {
    Ok(web::Json(state.dashboard.dashboard(learner.user_id()).await?))
}

/// Streak, favourite category and learning hours.
#[utoipa::path(
    get,
    path = "/dashboard/statistics",
    responses(
        (status = 200, description = "Learning statistics", body = LearningStatistics),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["portal"],
    operation_id = "learningStatistics"
)]
#[get("/dashboard/statistics")]
pub async fn statistics(
    state: web::Data<HttpState>,
    learner: AuthenticatedLearner,
) -> ApiResult<web::Json<LearningStatistics>> {
    Ok(web::Json(
        state.dashboard.learning_statistics(learner.user_id()).await?,
    ))
}

/// Optional enrollment status filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyCoursesQuery {
    /// `assigned`, `in_progress`, `completed` or `overdue`.
    pub status: Option<String>,
}

/// The learner's enrollments with per-status counters.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyCoursesResponse {
    pub enrollments: Vec<EnrollmentDetail>,
    pub selected_status: Option<EnrollmentStatus>,
    pub course_stats: CourseStatistics,
}

/// Enrolled courses, newest enrollment first.
#[utoipa::path(
    get,
    path = "/my-courses",
    params(MyCoursesQuery),
    responses(
        (status = 200, description = "Enrolled courses", body = MyCoursesResponse),
        (status = 400, description = "Unknown status", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["portal"],
    operation_id = "myCourses"
)]
#[get("/my-courses")]
pub async fn my_courses(
    state: web::Data<HttpState>,
    learner: AuthenticatedLearner,
    query: web::Query<MyCoursesQuery>,
) -> ApiResult<web::Json<MyCoursesResponse>> {
    let status = parse_optional::<EnrollmentStatus>(query.status.as_deref(), STATUS)?;
    let student_id = learner.user_id();
    let enrollments = state.dashboard.my_courses(student_id, status).await?;
    let course_stats = state.dashboard.course_statistics(student_id).await?;
    Ok(web::Json(MyCoursesResponse {
        enrollments,
        selected_status: status,
        course_stats,
    }))
}

/// Issued certificates with counters.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificationsResponse {
    pub certifications: Vec<Certification>,
    pub cert_stats: CertificationStatistics,
}

/// Certificates earned by the learner, newest first.
#[utoipa::path(
    get,
    path = "/certifications",
    responses(
        (status = 200, description = "Certificates", body = CertificationsResponse),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["portal"],
    operation_id = "myCertifications"
)]
#[get("/certifications")]
pub async fn certifications(
    state: web::Data<HttpState>,
    learner: AuthenticatedLearner,
) -> ApiResult<web::Json<CertificationsResponse>> {
    let student_id = learner.user_id();
    Ok(web::Json(CertificationsResponse {
        certifications: state.dashboard.certifications(student_id).await?,
        cert_stats: state.dashboard.certification_statistics(student_id).await?,
    }))
}

/// Profile page payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_profile: LearnerProfile,
    pub learning_stats: LearningStatistics,
}

/// Account details and learning statistics.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["portal"],
    operation_id = "myProfile"
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    learner: AuthenticatedLearner,
) -> ApiResult<web::Json<ProfileResponse>> {
    let student_id = learner.user_id();
    Ok(web::Json(ProfileResponse {
        user_profile: state.dashboard.profile(student_id).await?,
        learning_stats: state.dashboard.learning_statistics(student_id).await?,
    }))
}
