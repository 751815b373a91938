//! HTTP inbound adapter exposing the admin API and the learner portal.
//!
//! Both surfaces are registered through [`configure_admin`] and
//! [`configure_portal`] so the server and the tests share one route table.
//! Literal segments (`with-trainers`, `materials`, `page`) are registered
//! before the `{id}` routes they would otherwise collide with.

pub mod admin_courses;
pub mod admin_enrollments;
pub mod admin_reporting;
pub mod courses;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod login;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod trainer_assignments;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api/admin` handlers on a scope or app.
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.service(admin_reporting::summary)
        .service(admin_reporting::learners)
        .service(admin_reporting::trainers)
        .service(admin_courses::list_courses)
        .service(admin_courses::create_course)
        .service(admin_courses::courses_with_trainers)
        .service(admin_courses::delete_material)
        .service(admin_courses::get_course)
        .service(admin_courses::update_course)
        .service(admin_courses::delete_course)
        .service(admin_courses::list_materials)
        .service(admin_courses::add_material)
        .service(admin_courses::course_learners)
        .service(admin_enrollments::list_enrollments)
        .service(admin_enrollments::create_enrollment)
        .service(admin_enrollments::course_enrollments)
        .service(admin_enrollments::get_enrollment)
        .service(admin_enrollments::update_enrollment)
        .service(admin_enrollments::delete_enrollment)
        .service(trainer_assignments::assign_trainer)
        .service(trainer_assignments::course_assignments)
        .service(trainer_assignments::trainer_assignments)
        .service(trainer_assignments::check_assignment)
        .service(trainer_assignments::remove_assignment);
}

/// Register the session-backed learner portal handlers.
pub fn configure_portal(cfg: &mut web::ServiceConfig) {
    cfg.service(login::session_status)
        .service(login::login)
        .service(login::logout)
        .service(courses::course_page)
        .service(courses::categories)
        .service(courses::browse_courses)
        .service(courses::enroll)
        .service(dashboard::dashboard)
        .service(dashboard::statistics)
        .service(dashboard::my_courses)
        .service(dashboard::certifications)
        .service(dashboard::profile);
}
