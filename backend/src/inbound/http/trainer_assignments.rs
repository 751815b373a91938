//! Trainer-to-course assignment handlers.
//!
//! ```text
//! POST   /api/admin/trainers-courses/assign {"trainerUserId":3,"courseId":7}
//! GET    /api/admin/trainers-courses/course/{courseId}
//! GET    /api/admin/trainers-courses/trainer/{trainerId}
//! GET    /api/admin/trainers-courses/check/{courseId}/{trainerId}
//! DELETE /api/admin/trainers-courses/remove/{courseId}/{trainerId}
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::AssignmentRemoval;
use crate::domain::{CourseId, Error, ErrorCode, TrainerAssignment, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const TRAINER_USER_ID: FieldName = FieldName::new("trainerUserId");
const COURSE_ID: FieldName = FieldName::new("courseId");

/// Assignment body. Both fields are required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignTrainerRequest {
    #[schema(value_type = Option<i64>)]
    pub trainer_user_id: Option<UserId>,
    #[schema(value_type = Option<i64>)]
    pub course_id: Option<CourseId>,
}

/// Assign a trainer, replacing any trainer the course already has.
#[utoipa::path(
    post,
    path = "/api/admin/trainers-courses/assign",
    request_body = AssignTrainerRequest,
    responses(
        (status = 200, description = "Stored assignment", body = TrainerAssignment),
        (status = 400, description = "Missing field, unknown trainer or course, or trainer already assigned", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminAssignTrainer"
)]
#[post("/trainers-courses/assign")]
pub async fn assign_trainer(
    state: web::Data<HttpState>,
    payload: web::Json<AssignTrainerRequest>,
) -> ApiResult<web::Json<TrainerAssignment>> {
    let AssignTrainerRequest {
        trainer_user_id,
        course_id,
    } = payload.into_inner();
    let trainer_id = require(trainer_user_id, TRAINER_USER_ID)?;
    let course_id = require(course_id, COURSE_ID)?;
    let assignment = state
        .assignments
        .assign(trainer_id, course_id)
        .await
        .map_err(rejected_assignment)?;
    Ok(web::Json(assignment))
}

/// Unknown records and duplicate pairs are reported as bad requests.
fn rejected_assignment(error: Error) -> Error {
    match error.code() {
        ErrorCode::NotFound | ErrorCode::Conflict => Error::invalid_request(error.message()),
        _ => error,
    }
}

/// Assignments for a course.
#[utoipa::path(
    get,
    path = "/api/admin/trainers-courses/course/{courseId}",
    params(("courseId" = i64, Path, description = "Course identifier")),
    responses((status = 200, description = "Course assignments", body = [TrainerAssignment])),
    tags = ["admin"],
    operation_id = "adminCourseAssignments"
)]
#[get("/trainers-courses/course/{course_id}")]
pub async fn course_assignments(
    state: web::Data<HttpState>,
    path: web::Path<CourseId>,
) -> ApiResult<web::Json<Vec<TrainerAssignment>>> {
    Ok(web::Json(
        state.assignments.for_course(path.into_inner()).await?,
    ))
}

/// Assignments held by a trainer.
#[utoipa::path(
    get,
    path = "/api/admin/trainers-courses/trainer/{trainerId}",
    params(("trainerId" = i64, Path, description = "Trainer's user identifier")),
    responses((status = 200, description = "Trainer assignments", body = [TrainerAssignment])),
    tags = ["admin"],
    operation_id = "adminTrainerAssignments"
)]
#[get("/trainers-courses/trainer/{trainer_id}")]
pub async fn trainer_assignments(
    state: web::Data<HttpState>,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Vec<TrainerAssignment>>> {
    Ok(web::Json(
        state.assignments.for_trainer(path.into_inner()).await?,
    ))
}

/// Whether the trainer is assigned to the course. Responds with a bare
/// JSON boolean.
#[utoipa::path(
    get,
    path = "/api/admin/trainers-courses/check/{courseId}/{trainerId}",
    params(
        ("courseId" = i64, Path, description = "Course identifier"),
        ("trainerId" = i64, Path, description = "Trainer's user identifier")
    ),
    responses((status = 200, description = "Assignment exists", body = bool)),
    tags = ["admin"],
    operation_id = "adminCheckAssignment"
)]
#[get("/trainers-courses/check/{course_id}/{trainer_id}")]
pub async fn check_assignment(
    state: web::Data<HttpState>,
    path: web::Path<(CourseId, UserId)>,
) -> ApiResult<web::Json<bool>> {
    let (course_id, trainer_id) = path.into_inner();
    Ok(web::Json(
        state.assignments.is_assigned(course_id, trainer_id).await?,
    ))
}

/// Remove the pair's assignment if present.
#[utoipa::path(
    delete,
    path = "/api/admin/trainers-courses/remove/{courseId}/{trainerId}",
    params(
        ("courseId" = i64, Path, description = "Course identifier"),
        ("trainerId" = i64, Path, description = "Trainer's user identifier")
    ),
    responses((status = 200, description = "Removal outcome", body = AssignmentRemoval)),
    tags = ["admin"],
    operation_id = "adminRemoveAssignment"
)]
#[delete("/trainers-courses/remove/{course_id}/{trainer_id}")]
pub async fn remove_assignment(
    state: web::Data<HttpState>,
    path: web::Path<(CourseId, UserId)>,
) -> ApiResult<web::Json<AssignmentRemoval>> {
    let (course_id, trainer_id) = path.into_inner();
    Ok(web::Json(
        state.assignments.remove(course_id, trainer_id).await?,
    ))
}
