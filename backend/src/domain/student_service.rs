//! Learner account and self-enrollment service.
//!
//! Implements [`LearnerAccounts`] (signup-on-login) and [`LearnerEnrollment`].
//! Enrollment runs the eligibility rules in order and inserts an `assigned`
//! row dated today; the store's unique (student, course) index turns a racing
//! duplicate into the same conflict a sequential retry would see.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CourseRepository, EnrollmentRepository, EnrollmentRepositoryError, LearnerAccounts,
    LearnerEnrollment, UserRepository, UserRepositoryError,
};
use crate::domain::{
    CourseId, Email, Enrollment, EnrollmentEligibility, Error, NewEnrollment, NewUser, User,
    UserId,
};

pub(crate) const COURSE_NOT_FOUND: &str = "Course not found.";
pub(crate) const COURSE_UNAVAILABLE: &str =
    "This course is not currently available for enrollment.";
pub(crate) const ALREADY_ENROLLED: &str = "You are already enrolled in this course.";

fn map_enrollment_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Duplicate { .. } => Error::conflict(ALREADY_ENROLLED),
        other => other.into(),
    }
}

/// Learner-facing account and enrollment operations.
#[derive(Clone)]
pub struct StudentService<U, C, E> {
    users: Arc<U>,
    courses: Arc<C>,
    enrollments: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U, C, E> StudentService<U, C, E> {
    /// Create the service over its repositories and a clock for "today".
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

#[async_trait]
impl<U, C, E> LearnerAccounts for StudentService<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    async fn login(&self, email: &Email) -> Result<User, Error> {
        if let Some(user) = self.users.find_by_email(email).await? {
            debug!(user_id = %user.id, "existing learner logged in");
            return Ok(user);
        }
        let created = match self.users.create(&NewUser::learner_from_email(email.clone())).await {
            Ok(user) => user,
            // Two first logins raced; the other one created the account.
            Err(UserRepositoryError::DuplicateEmail { .. }) => self
                .users
                .find_by_email(email)
                .await?
                .ok_or_else(|| Error::internal("account vanished after signup conflict"))?,
            Err(other) => return Err(other.into()),
        };
        info!(user_id = %created.id, "created learner account on first login");
        Ok(created)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, Error> {
        Ok(self.users.find_by_email(email).await?)
    }
}

#[async_trait]
impl<U, C, E> LearnerEnrollment for StudentService<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    async fn enroll(&self, student_id: UserId, course_id: CourseId) -> Result<Enrollment, Error> {
        if self.users.find_by_id(student_id).await?.is_none() {
            return Err(Error::not_found(format!("student {student_id} not found")));
        }
        let course = self.courses.find_by_id(course_id).await?;
        let enrolled = self
            .enrollments
            .find_for_student_and_course(student_id, course_id)
            .await
            .map_err(map_enrollment_error)?
            .is_some();
        match EnrollmentEligibility::evaluate(course.as_ref(), enrolled) {
            EnrollmentEligibility::CourseNotFound => return Err(Error::not_found(COURSE_NOT_FOUND)),
            EnrollmentEligibility::CourseUnavailable => {
                return Err(Error::invalid_request(COURSE_UNAVAILABLE));
            }
            EnrollmentEligibility::AlreadyEnrolled => return Err(Error::conflict(ALREADY_ENROLLED)),
            EnrollmentEligibility::Eligible => {}
        }

        let today = self.clock.utc().date_naive();
        let enrollment = self
            .enrollments
            .create(&NewEnrollment::assigned(student_id, course_id, today))
            .await
            .map_err(map_enrollment_error)?;
        info!(%student_id, %course_id, enrollment_id = %enrollment.id, "learner enrolled");
        Ok(enrollment)
    }

    async fn is_enrolled(&self, student_id: UserId, course_id: CourseId) -> Result<bool, Error> {
        Ok(self
            .enrollments
            .find_for_student_and_course(student_id, course_id)
            .await?
            .is_some())
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
