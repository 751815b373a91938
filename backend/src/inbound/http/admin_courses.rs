//! Admin course and course-material handlers.
//!
//! ```text
//! GET    /api/admin/courses
//! POST   /api/admin/courses
//! GET    /api/admin/courses/with-trainers
//! DELETE /api/admin/courses/materials/{materialId}
//! GET    /api/admin/courses/{id}
//! PUT    /api/admin/courses/{id}
//! DELETE /api/admin/courses/{id}
//! GET    /api/admin/courses/{id}/materials
//! POST   /api/admin/courses/{id}/materials
//! GET    /api/admin/courses/{id}/learners
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Course, CourseDraft, CourseId, CourseLearner, CourseLevel, CourseMaterial, CourseStatus,
    CourseWithTrainer, Error, MaterialId, NewCourseMaterial,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional, require};

const TITLE: FieldName = FieldName::new("title");
const STATUS: FieldName = FieldName::new("status");
const LEVEL: FieldName = FieldName::new("level");
const MATERIAL_URL: FieldName = FieldName::new("materialUrl");

/// Course create/replace body.
///
/// `PUT` replaces every column: omitted optional fields are cleared.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub prerequisites: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_capacity: Option<i32>,
    /// `upcoming` (default), `active` or `archived`.
    pub status: Option<String>,
    /// `Beginner`, `Intermediate` or `Advanced`.
    pub level: Option<String>,
    pub duration_weeks: Option<i32>,
    pub instructor_name: Option<String>,
    pub price: Option<f64>,
}

impl TryFrom<CourseRequest> for CourseDraft {
    type Error = Error;

    fn try_from(value: CourseRequest) -> Result<Self, Self::Error> {
        let status = parse_optional::<CourseStatus>(value.status.as_deref(), STATUS)?;
        let level = parse_optional::<CourseLevel>(value.level.as_deref(), LEVEL)?;
        Ok(Self {
            title: require(value.title, TITLE)?,
            category: value.category,
            description: value.description,
            prerequisites: value.prerequisites,
            start_date: value.start_date,
            end_date: value.end_date,
            max_capacity: value.max_capacity,
            status: status.unwrap_or_default(),
            level,
            duration_weeks: value.duration_weeks,
            instructor_name: value.instructor_name,
            price: value.price,
        })
    }
}

/// Material upload body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequest {
    pub material_url: Option<String>,
    pub material_description: Option<String>,
}

impl TryFrom<MaterialRequest> for NewCourseMaterial {
    type Error = Error;

    fn try_from(value: MaterialRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            material_url: require(value.material_url, MATERIAL_URL)?,
            material_description: value.material_description,
        })
    }
}

/// List every course, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/courses",
    responses(
        (status = 200, description = "All courses", body = [Course]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListCourses"
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Course>>> {
    Ok(web::Json(state.courses.list().await?))
}

/// Create a course.
#[utoipa::path(
    post,
    path = "/api/admin/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Created course", body = Course),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminCreateCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CourseDraft::try_from(payload.into_inner())?;
    let course = state.courses.create(draft).await?;
    Ok(HttpResponse::Created().json(course))
}

/// Courses joined with their assigned trainer.
#[utoipa::path(
    get,
    path = "/api/admin/courses/with-trainers",
    responses((status = 200, description = "Courses with trainers", body = [CourseWithTrainer])),
    tags = ["admin"],
    operation_id = "adminCoursesWithTrainers"
)]
#[get("/courses/with-trainers")]
pub async fn courses_with_trainers(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CourseWithTrainer>>> {
    Ok(web::Json(state.reporting.courses_with_trainers().await?))
}

/// Delete one material. Deleting a missing material is a no-op.
#[utoipa::path(
    delete,
    path = "/api/admin/courses/materials/{materialId}",
    params(("materialId" = i64, Path, description = "Material identifier")),
    responses((status = 204, description = "Material absent")),
    tags = ["admin"],
    operation_id = "adminDeleteMaterial"
)]
#[delete("/courses/materials/{material_id}")]
pub async fn delete_material(
    state: web::Data<HttpState>,
    path: web::Path<MaterialId>,
) -> ApiResult<HttpResponse> {
    state.courses.delete_material(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/admin/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminGetCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<CourseId>,
) -> ApiResult<web::Json<Course>> {
    Ok(web::Json(state.courses.get(path.into_inner()).await?))
}

/// Replace a course.
#[utoipa::path(
    put,
    path = "/api/admin/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Updated course", body = Course),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<CourseId>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<Course>> {
    let draft = CourseDraft::try_from(payload.into_inner())?;
    Ok(web::Json(
        state.courses.update(path.into_inner(), draft).await?,
    ))
}

/// Delete a course together with its materials, enrollments and
/// assignment.
#[utoipa::path(
    delete,
    path = "/api/admin/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<CourseId>,
) -> ApiResult<HttpResponse> {
    state.courses.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Materials attached to a course, oldest first.
#[utoipa::path(
    get,
    path = "/api/admin/courses/{id}/materials",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course materials", body = [CourseMaterial]),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListMaterials"
)]
#[get("/courses/{id}/materials")]
pub async fn list_materials(
    state: web::Data<HttpState>,
    path: web::Path<CourseId>,
) -> ApiResult<web::Json<Vec<CourseMaterial>>> {
    Ok(web::Json(state.courses.materials(path.into_inner()).await?))
}

/// Attach a material to a course.
#[utoipa::path(
    post,
    path = "/api/admin/courses/{id}/materials",
    params(("id" = i64, Path, description = "Course identifier")),
    request_body = MaterialRequest,
    responses(
        (status = 201, description = "Created material", body = CourseMaterial),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminAddMaterial"
)]
#[post("/courses/{id}/materials")]
pub async fn add_material(
    state: web::Data<HttpState>,
    path: web::Path<CourseId>,
    payload: web::Json<MaterialRequest>,
) -> ApiResult<HttpResponse> {
    let material = NewCourseMaterial::try_from(payload.into_inner())?;
    let created = state
        .courses
        .add_material(path.into_inner(), material)
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Students enrolled in a course.
#[utoipa::path(
    get,
    path = "/api/admin/courses/{id}/learners",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Enrolled learners", body = [CourseLearner]),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminCourseLearners"
)]
#[get("/courses/{id}/learners")]
pub async fn course_learners(
    state: web::Data<HttpState>,
    path: web::Path<CourseId>,
) -> ApiResult<web::Json<Vec<CourseLearner>>> {
    Ok(web::Json(
        state.reporting.course_learners(path.into_inner()).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn missing_title_is_a_missing_field() {
        let err = CourseDraft::try_from(CourseRequest::default()).expect_err("missing title");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "title", "code": "missing_field"}))
        );
    }

    #[rstest]
    fn status_defaults_to_upcoming() {
        let draft = CourseDraft::try_from(CourseRequest {
            title: Some("Rust".into()),
            level: Some("Beginner".into()),
            ..CourseRequest::default()
        })
        .expect("valid request");

        assert_eq!(draft.status, CourseStatus::Upcoming);
        assert_eq!(draft.level, Some(CourseLevel::Beginner));
    }

    #[rstest]
    #[case("status", CourseRequest { title: Some("Rust".into()), status: Some("paused".into()), ..CourseRequest::default() })]
    #[case("level", CourseRequest { title: Some("Rust".into()), level: Some("Expert".into()), ..CourseRequest::default() })]
    fn unknown_enum_values_are_rejected(#[case] field: &str, #[case] request: CourseRequest) {
        let err = CourseDraft::try_from(request).expect_err("invalid enum");

        assert_eq!(
            err.details(),
            Some(&json!({"field": field, "code": "invalid_value"}))
        );
    }

    #[rstest]
    fn material_requires_a_url() {
        let err = NewCourseMaterial::try_from(MaterialRequest {
            material_url: None,
            material_description: Some("slides".into()),
        })
        .expect_err("missing url");

        assert_eq!(
            err.details(),
            Some(&json!({"field": "materialUrl", "code": "missing_field"}))
        );
    }
}
