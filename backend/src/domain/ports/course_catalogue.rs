//! Driving port for the learner-facing course catalogue.

use async_trait::async_trait;

use crate::domain::{
    Course, CourseFilter, CourseId, EnrollmentEligibility, Error, Page, PageRequest, UserId,
};

/// Catalogue browsing and enrollment eligibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogue: Send + Sync {
    /// Distinct non-blank categories, sorted.
    async fn categories(&self) -> Result<Vec<String>, Error>;

    /// Active courses, newest first.
    async fn active_courses(&self) -> Result<Vec<Course>, Error>;

    /// Active courses narrowed by category, level and keyword.
    async fn active_courses_filtered(&self, filter: &CourseFilter) -> Result<Vec<Course>, Error>;

    /// Active courses whose title or description contains `keyword`.
    ///
    /// A blank keyword lists every active course.
    async fn search_active(&self, keyword: &str) -> Result<Vec<Course>, Error>;

    /// One page of active courses.
    async fn active_courses_page(&self, request: PageRequest) -> Result<Page<Course>, Error>;

    /// Number of active courses.
    async fn total_active_courses(&self) -> Result<u64, Error>;

    /// Whether the course exists and is active.
    async fn is_course_available(&self, course_id: CourseId) -> Result<bool, Error>;

    /// Why a student may or may not enroll in a course.
    async fn eligibility(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<EnrollmentEligibility, Error>;

    /// Collapsed view of [`CourseCatalogue::eligibility`].
    async fn can_enroll(&self, student_id: UserId, course_id: CourseId) -> Result<bool, Error> {
        Ok(self.eligibility(student_id, course_id).await?.is_eligible())
    }
}
