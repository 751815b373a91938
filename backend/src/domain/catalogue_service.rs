//! Learner-facing catalogue service implementing [`CourseCatalogue`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CourseCatalogue, CourseRepository, EnrollmentRepository};
use crate::domain::{
    Course, CourseFilter, CourseId, CourseStatus, EnrollmentEligibility, Error, Page, PageRequest,
    UserId,
};

/// Catalogue queries and eligibility over the course and enrollment stores.
#[derive(Clone)]
pub struct CourseCatalogueService<C, E> {
    courses: Arc<C>,
    enrollments: Arc<E>,
}

impl<C, E> CourseCatalogueService<C, E> {
    /// Create the service over its repositories.
    pub const fn new(courses: Arc<C>, enrollments: Arc<E>) -> Self {
        Self {
            courses,
            enrollments,
        }
    }
}

#[async_trait]
impl<C, E> CourseCatalogue for CourseCatalogueService<C, E>
where
    C: CourseRepository,
    E: EnrollmentRepository,
{
    async fn categories(&self) -> Result<Vec<String>, Error> {
        Ok(self.courses.categories().await?)
    }

    async fn active_courses(&self) -> Result<Vec<Course>, Error> {
        self.active_courses_filtered(&CourseFilter::default()).await
    }

    async fn active_courses_filtered(&self, filter: &CourseFilter) -> Result<Vec<Course>, Error> {
        Ok(self
            .courses
            .list(Some(CourseStatus::Active), filter)
            .await?)
    }

    async fn search_active(&self, keyword: &str) -> Result<Vec<Course>, Error> {
        let filter = CourseFilter::new(None, None, Some(keyword));
        self.active_courses_filtered(&filter).await
    }

    async fn active_courses_page(&self, request: PageRequest) -> Result<Page<Course>, Error> {
        let items = self.courses.page(CourseStatus::Active, request).await?;
        let total = self.courses.count(Some(CourseStatus::Active)).await?;
        Ok(Page::new(items, request, total))
    }

    async fn total_active_courses(&self) -> Result<u64, Error> {
        Ok(self.courses.count(Some(CourseStatus::Active)).await?)
    }

    async fn is_course_available(&self, course_id: CourseId) -> Result<bool, Error> {
        let course = self.courses.find_by_id(course_id).await?;
        Ok(course.is_some_and(|course| course.is_active()))
    }

    async fn eligibility(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<EnrollmentEligibility, Error> {
        let course = self.courses.find_by_id(course_id).await?;
        let enrolled = match &course {
            Some(course) if course.is_active() => self
                .enrollments
                .find_for_student_and_course(student_id, course_id)
                .await?
                .is_some(),
            _ => false,
        };
        let outcome = EnrollmentEligibility::evaluate(course.as_ref(), enrolled);
        debug!(%student_id, %course_id, ?outcome, "evaluated enrollment eligibility");
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
