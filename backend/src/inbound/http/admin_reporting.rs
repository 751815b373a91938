//! Admin dashboard and roster handlers.
//!
//! ```text
//! GET /api/admin/dashboard/summary
//! GET /api/admin/learners
//! GET /api/admin/trainers
//! ```

use actix_web::{get, web};

use crate::domain::{AdminSummary, Error, LearnerRosterEntry, TrainerRosterEntry, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Learner, trainer and course counters.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard/summary",
    responses(
        (status = 200, description = "Headline counters", body = AdminSummary),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminSummary"
)]
#[get("/dashboard/summary")]
pub async fn summary(state: web::Data<HttpState>) -> ApiResult<web::Json<AdminSummary>> {
    Ok(web::Json(state.reporting.summary().await?))
}

/// Students with their latest enrollment, newest account first.
#[utoipa::path(
    get,
    path = "/api/admin/learners",
    responses((status = 200, description = "Learner roster", body = [LearnerRosterEntry])),
    tags = ["admin"],
    operation_id = "adminLearners"
)]
#[get("/learners")]
pub async fn learners(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LearnerRosterEntry>>> {
    Ok(web::Json(state.reporting.learners().await?))
}

/// Trainers, newest account first.
#[utoipa::path(
    get,
    path = "/api/admin/trainers",
    responses((status = 200, description = "Trainer roster", body = [User])),
    tags = ["admin"],
    operation_id = "adminTrainers"
)]
#[get("/trainers")]
pub async fn trainers(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TrainerRosterEntry>>> {
    Ok(web::Json(state.reporting.trainers().await?))
}
