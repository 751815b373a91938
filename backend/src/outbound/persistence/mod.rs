//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. Eligibility, validation and ordering of
//!   checks live in the domain services.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Constraint backstops**: Unique indexes on enrollments and trainer
//!   assignments surface as the ports' `Duplicate` variants.
//!
//! # Example
//!
//! ```ignore
//! use learnhub::outbound::persistence::{DbPool, PoolConfig, DieselCourseRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/learnhub");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselCourseRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_certification_repository;
mod diesel_course_material_repository;
mod diesel_course_repository;
mod diesel_enrollment_repository;
mod diesel_helpers;
mod diesel_roster_query;
mod diesel_trainer_assignment_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_certification_repository::DieselCertificationRepository;
pub use diesel_course_material_repository::DieselCourseMaterialRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_roster_query::DieselRosterQuery;
pub use diesel_trainer_assignment_repository::DieselTrainerAssignmentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
