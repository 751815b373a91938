//! Learner portal catalogue and self-service enrollment.
//!
//! ```text
//! GET  /courses?category=&level=&q=
//! GET  /courses/page?page=&size=
//! GET  /courses/categories
//! POST /courses/{id}/enroll
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Course, CourseFilter, CourseId, CourseLevel, Enrollment, Error, Page, PageRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::AuthenticatedLearner;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional};

const LEVEL: FieldName = FieldName::new("level");
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Catalogue filters. Blank values and `category=all` are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogueQuery {
    /// Exact category match.
    pub category: Option<String>,
    /// `Beginner`, `Intermediate` or `Advanced`.
    pub level: Option<String>,
    /// Case-insensitive keyword over title and description.
    pub q: Option<String>,
}

/// Paging parameters for `/courses/page`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index; defaults to 0.
    pub page: Option<u32>,
    /// Page size between 1 and 100; defaults to 10.
    pub size: Option<u32>,
}

/// Active catalogue plus what the portal needs to render its filters.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueResponse {
    pub courses: Vec<Course>,
    pub categories: Vec<String>,
    #[schema(value_type = Vec<i64>)]
    pub enrolled_course_ids: Vec<CourseId>,
    /// Category filter echoed back, `all` when none applied.
    pub selected_category: String,
}

fn selected_category(filter: &CourseFilter) -> String {
    filter.category().unwrap_or("all").to_owned()
}

/// Browse active courses.
#[utoipa::path(
    get,
    path = "/courses",
    params(CatalogueQuery),
    responses(
        (status = 200, description = "Active catalogue", body = CatalogueResponse),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["portal"],
    operation_id = "browseCourses"
)]
#[get("/courses")]
pub async fn browse_courses(
    state: web::Data<HttpState>,
    learner: AuthenticatedLearner,
    query: web::Query<CatalogueQuery>,
) -> ApiResult<web::Json<CatalogueResponse>> {
    let CatalogueQuery { category, level, q } = query.into_inner();
    let level = parse_optional::<CourseLevel>(level.as_deref(), LEVEL)?;
    let filter = CourseFilter::new(category.as_deref(), level, q.as_deref());

    let courses = state.catalogue.active_courses_filtered(&filter).await?;
    let category_names = state.catalogue.categories().await?;
    let enrolled_course_ids = state
        .dashboard
        .my_courses(learner.user_id(), None)
        .await?
        .into_iter()
        .map(|detail| detail.enrollment.course_id)
        .collect();

    Ok(web::Json(CatalogueResponse {
        courses,
        categories: category_names,
        enrolled_course_ids,
        selected_category: selected_category(&filter),
    }))
}

/// One page of the active catalogue, newest first.
#[utoipa::path(
    get,
    path = "/courses/page",
    params(PageQuery),
    responses(
        (status = 200, description = "Catalogue page", body = Page<Course>),
        (status = 400, description = "Invalid page size", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["portal"],
    operation_id = "browseCoursePage"
)]
#[get("/courses/page")]
pub async fn course_page(
    state: web::Data<HttpState>,
    _learner: AuthenticatedLearner,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<Course>>> {
    let PageQuery { page, size } = query.into_inner();
    let request = PageRequest::new(page.unwrap_or(0), size.unwrap_or(DEFAULT_PAGE_SIZE))
        .map_err(|err| Error::invalid_value("size", err.to_string()))?;
    Ok(web::Json(state.catalogue.active_courses_page(request).await?))
}

/// Distinct categories of active courses, sorted.
#[utoipa::path(
    get,
    path = "/courses/categories",
    responses(
        (status = 200, description = "Categories", body = [String]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["portal"],
    operation_id = "courseCategories"
)]
#[get("/courses/categories")]
pub async fn categories(
    state: web::Data<HttpState>,
    _learner: AuthenticatedLearner,
) -> ApiResult<web::Json<Vec<String>>> {
    Ok(web::Json(state.catalogue.categories().await?))
}

/// Enroll the logged-in learner.
#[utoipa::path(
    post,
    path = "/courses/{id}/enroll",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "New enrollment", body = Enrollment),
        (status = 400, description = "Course not open for enrollment", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Course not found", body = Error),
        (status = 409, description = "Already enrolled", body = Error)
    ),
    tags = ["portal"],
    operation_id = "enrollInCourse"
)]
#[post("/courses/{id}/enroll")]
pub async fn enroll(
    state: web::Data<HttpState>,
    learner: AuthenticatedLearner,
    path: web::Path<CourseId>,
) -> ApiResult<web::Json<Enrollment>> {
    let enrollment = state
        .enrollment
        .enroll(learner.user_id(), path.into_inner())
        .await?;
    Ok(web::Json(enrollment))
}
