//! Course administration service implementing [`CourseAdministration`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CourseAdministration, CourseMaterialRepository, CourseRepository, MaterialRemoval,
};
use crate::domain::{
    Course, CourseDraft, CourseFilter, CourseId, CourseMaterial, CourseValidationError, Error,
    MaterialId, NewCourseMaterial,
};

fn course_not_found(id: CourseId) -> Error {
    Error::not_found(format!("course {id} not found"))
}

fn invalid_draft(error: CourseValidationError) -> Error {
    Error::invalid_value(error.field(), error.to_string())
}

/// Course and material CRUD for the admin console.
#[derive(Clone)]
pub struct CourseAdministrationService<C, M> {
    courses: Arc<C>,
    materials: Arc<M>,
}

impl<C, M> CourseAdministrationService<C, M> {
    /// Create the service over the course and material stores.
    pub const fn new(courses: Arc<C>, materials: Arc<M>) -> Self {
        Self { courses, materials }
    }
}

impl<C, M> CourseAdministrationService<C, M>
where
    C: CourseRepository,
    M: CourseMaterialRepository,
{
    async fn ensure_course(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| course_not_found(id))
    }
}

#[async_trait]
impl<C, M> CourseAdministration for CourseAdministrationService<C, M>
where
    C: CourseRepository,
    M: CourseMaterialRepository,
{
    async fn list(&self) -> Result<Vec<Course>, Error> {
        Ok(self.courses.list(None, &CourseFilter::default()).await?)
    }

    async fn get(&self, id: CourseId) -> Result<Course, Error> {
        self.ensure_course(id).await
    }

    async fn create(&self, draft: CourseDraft) -> Result<Course, Error> {
        draft.validate().map_err(invalid_draft)?;
        let course = self.courses.create(&draft).await?;
        info!(course_id = %course.id, status = %course.status, "course created");
        Ok(course)
    }

    async fn update(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error> {
        draft.validate().map_err(invalid_draft)?;
        self.courses
            .update(id, &draft)
            .await?
            .ok_or_else(|| course_not_found(id))
    }

    async fn delete(&self, id: CourseId) -> Result<(), Error> {
        if !self.courses.delete(id).await? {
            return Err(course_not_found(id));
        }
        info!(course_id = %id, "course deleted");
        Ok(())
    }

    async fn materials(&self, course_id: CourseId) -> Result<Vec<CourseMaterial>, Error> {
        self.ensure_course(course_id).await?;
        Ok(self.materials.list_for_course(course_id).await?)
    }

    async fn add_material(
        &self,
        course_id: CourseId,
        material: NewCourseMaterial,
    ) -> Result<CourseMaterial, Error> {
        if material.material_url.trim().is_empty() {
            return Err(Error::invalid_value(
                "materialUrl",
                "materialUrl must not be blank",
            ));
        }
        self.ensure_course(course_id).await?;
        Ok(self.materials.create(course_id, &material).await?)
    }

    async fn delete_material(&self, id: MaterialId) -> Result<MaterialRemoval, Error> {
        let removed = self.materials.delete(id).await?;
        info!(material_id = %id, removed, "course material delete requested");
        Ok(MaterialRemoval { removed })
    }
}

#[cfg(test)]
#[path = "course_admin_service_tests.rs"]
mod tests;
