//! Admin enrollment handlers.
//!
//! ```text
//! GET    /api/admin/enrollments
//! POST   /api/admin/enrollments
//! GET    /api/admin/enrollments/course/{courseId}
//! GET    /api/admin/enrollments/{id}
//! PUT    /api/admin/enrollments/{id}
//! DELETE /api/admin/enrollments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CourseId, Enrollment, EnrollmentDraft, EnrollmentId, EnrollmentStatus, Error, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional, require};

const STUDENT_ID: FieldName = FieldName::new("studentId");
const COURSE_ID: FieldName = FieldName::new("courseId");
const STATUS: FieldName = FieldName::new("status");

/// Enrollment create/replace body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    #[schema(value_type = Option<i64>)]
    pub student_id: Option<UserId>,
    #[schema(value_type = Option<i64>)]
    pub course_id: Option<CourseId>,
    /// Defaults to today.
    pub enrollment_date: Option<NaiveDate>,
    /// Defaults to 0.
    pub completion_percentage: Option<i32>,
    pub score: Option<f64>,
    /// `assigned` (default), `in_progress`, `completed` or `overdue`.
    pub status: Option<String>,
}

impl TryFrom<EnrollmentRequest> for EnrollmentDraft {
    type Error = Error;

    fn try_from(value: EnrollmentRequest) -> Result<Self, Self::Error> {
        let status = parse_optional::<EnrollmentStatus>(value.status.as_deref(), STATUS)?;
        Ok(Self {
            student_id: require(value.student_id, STUDENT_ID)?,
            course_id: require(value.course_id, COURSE_ID)?,
            enrollment_date: value.enrollment_date,
            completion_percentage: value.completion_percentage.unwrap_or(0),
            score: value.score,
            status: status.unwrap_or_default(),
        })
    }
}

/// List every enrollment, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/enrollments",
    responses((status = 200, description = "All enrollments", body = [Enrollment])),
    tags = ["admin"],
    operation_id = "adminListEnrollments"
)]
#[get("/enrollments")]
pub async fn list_enrollments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Enrollment>>> {
    Ok(web::Json(state.enrollments.list().await?))
}

/// Create an enrollment on a student's behalf.
#[utoipa::path(
    post,
    path = "/api/admin/enrollments",
    request_body = EnrollmentRequest,
    responses(
        (status = 201, description = "Created enrollment", body = Enrollment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Student or course not found", body = Error),
        (status = 409, description = "Student already enrolled", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminCreateEnrollment"
)]
#[post("/enrollments")]
pub async fn create_enrollment(
    state: web::Data<HttpState>,
    payload: web::Json<EnrollmentRequest>,
) -> ApiResult<HttpResponse> {
    let draft = EnrollmentDraft::try_from(payload.into_inner())?;
    let enrollment = state.enrollments.create(draft).await?;
    Ok(HttpResponse::Created().json(enrollment))
}

/// Enrollments for one course.
#[utoipa::path(
    get,
    path = "/api/admin/enrollments/course/{courseId}",
    params(("courseId" = i64, Path, description = "Course identifier")),
    responses((status = 200, description = "Course enrollments", body = [Enrollment])),
    tags = ["admin"],
    operation_id = "adminCourseEnrollments"
)]
#[get("/enrollments/course/{course_id}")]
pub async fn course_enrollments(
    state: web::Data<HttpState>,
    path: web::Path<CourseId>,
) -> ApiResult<web::Json<Vec<Enrollment>>> {
    Ok(web::Json(
        state.enrollments.for_course(path.into_inner()).await?,
    ))
}

/// Fetch one enrollment.
#[utoipa::path(
    get,
    path = "/api/admin/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment identifier")),
    responses(
        (status = 200, description = "Enrollment", body = Enrollment),
        (status = 404, description = "Enrollment not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminGetEnrollment"
)]
#[get("/enrollments/{id}")]
pub async fn get_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<EnrollmentId>,
) -> ApiResult<web::Json<Enrollment>> {
    Ok(web::Json(state.enrollments.get(path.into_inner()).await?))
}

/// Replace an enrollment.
#[utoipa::path(
    put,
    path = "/api/admin/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment identifier")),
    request_body = EnrollmentRequest,
    responses(
        (status = 200, description = "Updated enrollment", body = Enrollment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Enrollment not found", body = Error),
        (status = 409, description = "Pair already enrolled", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateEnrollment"
)]
#[put("/enrollments/{id}")]
pub async fn update_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<EnrollmentId>,
    payload: web::Json<EnrollmentRequest>,
) -> ApiResult<web::Json<Enrollment>> {
    let draft = EnrollmentDraft::try_from(payload.into_inner())?;
    Ok(web::Json(
        state.enrollments.update(path.into_inner(), draft).await?,
    ))
}

/// Delete an enrollment and its certification.
#[utoipa::path(
    delete,
    path = "/api/admin/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment identifier")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 404, description = "Enrollment not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteEnrollment"
)]
#[delete("/enrollments/{id}")]
pub async fn delete_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<EnrollmentId>,
) -> ApiResult<HttpResponse> {
    state.enrollments.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"courseId": 2}), "studentId")]
    #[case(json!({"studentId": 1}), "courseId")]
    fn missing_ids_are_reported(#[case] body: serde_json::Value, #[case] field: &str) {
        let request: EnrollmentRequest = serde_json::from_value(body).expect("request");

        let err = EnrollmentDraft::try_from(request).expect_err("missing id");

        assert_eq!(
            err.details(),
            Some(&json!({"field": field, "code": "missing_field"}))
        );
    }

    #[rstest]
    fn defaults_fill_progress_and_status() {
        let request: EnrollmentRequest =
            serde_json::from_value(json!({"studentId": 1, "courseId": 2})).expect("request");

        let draft = EnrollmentDraft::try_from(request).expect("valid request");

        assert_eq!(draft.completion_percentage, 0);
        assert_eq!(draft.status, EnrollmentStatus::Assigned);
        assert_eq!(draft.enrollment_date, None);
    }

    #[rstest]
    fn status_uses_snake_case() {
        let request: EnrollmentRequest = serde_json::from_value(json!({
            "studentId": 1,
            "courseId": 2,
            "status": "in_progress",
            "completionPercentage": 40
        }))
        .expect("request");

        let draft = EnrollmentDraft::try_from(request).expect("valid request");

        assert_eq!(draft.status, EnrollmentStatus::InProgress);
        assert_eq!(draft.completion_percentage, 40);
    }

    #[rstest]
    fn non_positive_ids_fail_to_deserialise() {
        let result = serde_json::from_value::<EnrollmentRequest>(json!({"studentId": 0}));
        assert!(result.is_err());
    }
}
