//! Driving port for the learner dashboard, my-courses, certificates and
//! profile pages.

use async_trait::async_trait;

use crate::domain::{
    Certification, CertificationStatistics, Course, CourseStatistics, DashboardStats,
    EnrollmentDetail, EnrollmentStatus, Error, LearnerDashboardView, LearnerProfile,
    LearningStatistics, ProgressOverview, UserId,
};

/// Read models for a signed-in learner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearnerDashboard: Send + Sync {
    /// Headline counters.
    async fn dashboard_stats(&self, student_id: UserId) -> Result<DashboardStats, Error>;

    /// Latest assigned, in-progress or completed enrollments.
    async fn recent_enrollments(
        &self,
        student_id: UserId,
        limit: usize,
    ) -> Result<Vec<EnrollmentDetail>, Error>;

    /// Latest certificates.
    async fn recent_certifications(
        &self,
        student_id: UserId,
        limit: usize,
    ) -> Result<Vec<Certification>, Error>;

    /// Active courses the learner has not enrolled in.
    async fn recommended_courses(
        &self,
        student_id: UserId,
        limit: usize,
    ) -> Result<Vec<Course>, Error>;

    /// Progress panel figures.
    async fn progress_overview(&self, student_id: UserId) -> Result<ProgressOverview, Error>;

    /// Enrollment counts per status.
    async fn course_statistics(&self, student_id: UserId) -> Result<CourseStatistics, Error>;

    /// Certificate counters.
    async fn certification_statistics(
        &self,
        student_id: UserId,
    ) -> Result<CertificationStatistics, Error>;

    /// Account fields plus membership month.
    async fn profile(&self, student_id: UserId) -> Result<LearnerProfile, Error>;

    /// Profile page statistics.
    async fn learning_statistics(&self, student_id: UserId) -> Result<LearningStatistics, Error>;

    /// The learner's enrollments, optionally by status, newest first.
    async fn my_courses(
        &self,
        student_id: UserId,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<EnrollmentDetail>, Error>;

    /// Every certificate, newest first.
    async fn certifications(&self, student_id: UserId) -> Result<Vec<Certification>, Error>;

    /// Everything the dashboard page renders.
    async fn dashboard(&self, student_id: UserId) -> Result<LearnerDashboardView, Error>;
}
