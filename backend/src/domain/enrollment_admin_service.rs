//! Enrollment administration service implementing
//! [`EnrollmentAdministration`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CourseRepository, EnrollmentAdministration, EnrollmentRepository, EnrollmentRepositoryError,
    UserRepository,
};
use crate::domain::{
    CourseId, Enrollment, EnrollmentDraft, EnrollmentId, Error, NewEnrollment,
};

fn enrollment_not_found(id: EnrollmentId) -> Error {
    Error::not_found(format!("enrollment {id} not found"))
}

fn map_write_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Duplicate {
            student_id,
            course_id,
        } => Error::conflict(format!(
            "student {student_id} is already enrolled in course {course_id}"
        )),
        other => other.into(),
    }
}

/// Enrollment CRUD for the admin console.
#[derive(Clone)]
pub struct EnrollmentAdministrationService<U, C, E> {
    users: Arc<U>,
    courses: Arc<C>,
    enrollments: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U, C, E> EnrollmentAdministrationService<U, C, E> {
    /// Create the service over its repositories and a clock for default dates.
    pub fn new(
        users: Arc<U>,
        courses: Arc<C>,
        enrollments: Arc<E>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            courses,
            enrollments,
            clock,
        }
    }
}

impl<U, C, E> EnrollmentAdministrationService<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    /// Validate the draft and confirm both ends of the pair exist.
    async fn resolve(&self, draft: EnrollmentDraft) -> Result<NewEnrollment, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_value(err.field(), err.to_string()))?;
        if self.users.find_by_id(draft.student_id).await?.is_none() {
            return Err(Error::not_found(format!(
                "student {} not found",
                draft.student_id
            )));
        }
        if self.courses.find_by_id(draft.course_id).await?.is_none() {
            return Err(Error::not_found(format!(
                "course {} not found",
                draft.course_id
            )));
        }
        Ok(draft.into_new(self.clock.utc().date_naive()))
    }
}

#[async_trait]
impl<U, C, E> EnrollmentAdministration for EnrollmentAdministrationService<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    async fn list(&self) -> Result<Vec<Enrollment>, Error> {
        Ok(self.enrollments.list().await?)
    }

    async fn get(&self, id: EnrollmentId) -> Result<Enrollment, Error> {
        self.enrollments
            .find_by_id(id)
            .await?
            .ok_or_else(|| enrollment_not_found(id))
    }

    async fn for_course(&self, course_id: CourseId) -> Result<Vec<Enrollment>, Error> {
        Ok(self.enrollments.list_for_course(course_id).await?)
    }

    async fn create(&self, draft: EnrollmentDraft) -> Result<Enrollment, Error> {
        let new = self.resolve(draft).await?;
        let enrollment = self
            .enrollments
            .create(&new)
            .await
            .map_err(map_write_error)?;
        info!(enrollment_id = %enrollment.id, "enrollment created by admin");
        Ok(enrollment)
    }

    async fn update(&self, id: EnrollmentId, draft: EnrollmentDraft) -> Result<Enrollment, Error> {
        let new = self.resolve(draft).await?;
        self.enrollments
            .update(id, &new)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| enrollment_not_found(id))
    }

    async fn delete(&self, id: EnrollmentId) -> Result<(), Error> {
        if !self.enrollments.delete(id).await? {
            return Err(enrollment_not_found(id));
        }
        info!(enrollment_id = %id, "enrollment deleted");
        Ok(())
    }
}
