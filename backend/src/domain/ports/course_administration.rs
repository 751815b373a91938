//! Driving port for course and course material administration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Course, CourseDraft, CourseId, CourseMaterial, Error, MaterialId, NewCourseMaterial,
};

/// Result of an idempotent material delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRemoval {
    /// Whether a row was actually removed.
    pub removed: bool,
}

/// Course CRUD plus nested materials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseAdministration: Send + Sync {
    /// Every course, newest first.
    async fn list(&self) -> Result<Vec<Course>, Error>;

    /// One course; `not_found` when missing.
    async fn get(&self, id: CourseId) -> Result<Course, Error>;

    /// Validate and store a new course.
    async fn create(&self, draft: CourseDraft) -> Result<Course, Error>;

    /// Validate and replace a course's fields.
    async fn update(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error>;

    /// Delete a course and its dependants.
    async fn delete(&self, id: CourseId) -> Result<(), Error>;

    /// Materials of a course, oldest first.
    async fn materials(&self, course_id: CourseId) -> Result<Vec<CourseMaterial>, Error>;

    /// Attach a material to a course.
    async fn add_material(
        &self,
        course_id: CourseId,
        material: NewCourseMaterial,
    ) -> Result<CourseMaterial, Error>;

    /// Delete one material. Deleting a missing id succeeds.
    async fn delete_material(&self, id: MaterialId) -> Result<MaterialRemoval, Error>;
}
