//! Learner dashboard service implementing [`LearnerDashboard`].
//!
//! Each operation fetches the rows it needs and hands them to the pure
//! aggregations in [`crate::domain::dashboard`]. Store failures propagate as
//! errors rather than collapsing into zeroed panels.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;

use crate::domain::dashboard::{
    RECENT_CERTIFICATIONS_LIMIT, RECENT_ENROLLMENTS_LIMIT, RECOMMENDED_COURSES_LIMIT,
    recent_certifications, recent_enrollments, recommended_courses,
    sort_newest_certifications_first, sort_newest_enrollments_first,
};
use crate::domain::ports::{
    CertificationRepository, CourseRepository, EnrollmentRepository, LearnerDashboard,
    UserRepository,
};
use crate::domain::{
    Certification, CertificationStatistics, Course, CourseFilter, CourseStatistics, CourseStatus,
    DashboardStats, EnrollmentDetail, EnrollmentStatus, Error, LearnerDashboardView,
    LearnerProfile, LearningStatistics, ProgressOverview, UserId,
};

/// Read-side aggregation for the learner portal.
#[derive(Clone)]
pub struct LearnerDashboardService<U, C, E, Z> {
    users: Arc<U>,
    courses: Arc<C>,
    enrollments: Arc<E>,
    certifications: Arc<Z>,
    clock: Arc<dyn Clock>,
}

impl<U, C, E, Z> LearnerDashboardService<U, C, E, Z> {
    /// Create the service over its repositories and a clock for "today".
    pub fn new(
        users: Arc<U>,
        courses: Arc<C>,
        enrollments: Arc<E>,
        certifications: Arc<Z>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            courses,
            enrollments,
            certifications,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

impl<U, C, E, Z> LearnerDashboardService<U, C, E, Z>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
    Z: CertificationRepository,
{
    async fn enrollment_history(&self, student_id: UserId) -> Result<Vec<EnrollmentDetail>, Error> {
        Ok(self
            .enrollments
            .details_for_student(student_id, None)
            .await?)
    }

    async fn certification_history(&self, student_id: UserId) -> Result<Vec<Certification>, Error> {
        Ok(self.certifications.list_for_student(student_id).await?)
    }

    async fn active_catalogue(&self) -> Result<Vec<Course>, Error> {
        Ok(self
            .courses
            .list(Some(CourseStatus::Active), &CourseFilter::default())
            .await?)
    }

    async fn stats_from(
        &self,
        enrollments: &[EnrollmentDetail],
        certifications: &[Certification],
    ) -> Result<DashboardStats, Error> {
        let active_courses = self.courses.count(Some(CourseStatus::Active)).await?;
        Ok(DashboardStats::compute(
            active_courses,
            enrollments,
            certifications.len() as u64,
        ))
    }
}

#[async_trait]
impl<U, C, E, Z> LearnerDashboard for LearnerDashboardService<U, C, E, Z>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
    Z: CertificationRepository,
{
    async fn dashboard_stats(&self, student_id: UserId) -> Result<DashboardStats, Error> {
        let enrollments = self.enrollment_history(student_id).await?;
        let certifications = self.certification_history(student_id).await?;
        self.stats_from(&enrollments, &certifications).await
    }

    async fn recent_enrollments(
        &self,
        student_id: UserId,
        limit: usize,
    ) -> Result<Vec<EnrollmentDetail>, Error> {
        let enrollments = self.enrollment_history(student_id).await?;
        Ok(recent_enrollments(&enrollments, limit))
    }

    async fn recent_certifications(
        &self,
        student_id: UserId,
        limit: usize,
    ) -> Result<Vec<Certification>, Error> {
        let certifications = self.certification_history(student_id).await?;
        Ok(recent_certifications(&certifications, limit))
    }

    async fn recommended_courses(
        &self,
        student_id: UserId,
        limit: usize,
    ) -> Result<Vec<Course>, Error> {
        let catalogue = self.active_catalogue().await?;
        let enrollments = self.enrollment_history(student_id).await?;
        Ok(recommended_courses(&catalogue, &enrollments, limit))
    }

    async fn progress_overview(&self, student_id: UserId) -> Result<ProgressOverview, Error> {
        let enrollments = self.enrollment_history(student_id).await?;
        Ok(ProgressOverview::compute(&enrollments, self.today()))
    }

    async fn course_statistics(&self, student_id: UserId) -> Result<CourseStatistics, Error> {
        let enrollments = self.enrollment_history(student_id).await?;
        Ok(CourseStatistics::compute(&enrollments))
    }

    async fn certification_statistics(
        &self,
        student_id: UserId,
    ) -> Result<CertificationStatistics, Error> {
        let certifications = self.certification_history(student_id).await?;
        Ok(CertificationStatistics::compute(&certifications, self.today()))
    }

    async fn profile(&self, student_id: UserId) -> Result<LearnerProfile, Error> {
        let user = self
            .users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {student_id} not found")))?;
        Ok(LearnerProfile::from(user))
    }

    async fn learning_statistics(&self, student_id: UserId) -> Result<LearningStatistics, Error> {
        let enrollments = self.enrollment_history(student_id).await?;
        let certifications = self.certification_history(student_id).await?;
        let stats = self.stats_from(&enrollments, &certifications).await?;
        Ok(LearningStatistics::compute(stats, &enrollments, self.today()))
    }

    async fn my_courses(
        &self,
        student_id: UserId,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<EnrollmentDetail>, Error> {
        let mut enrollments = self
            .enrollments
            .details_for_student(student_id, status)
            .await?;
        sort_newest_enrollments_first(&mut enrollments);
        Ok(enrollments)
    }

    async fn certifications(&self, student_id: UserId) -> Result<Vec<Certification>, Error> {
        let mut certifications = self.certification_history(student_id).await?;
        sort_newest_certifications_first(&mut certifications);
        Ok(certifications)
    }

    async fn dashboard(&self, student_id: UserId) -> Result<LearnerDashboardView, Error> {
        let enrollments = self.enrollment_history(student_id).await?;
        let certifications = self.certification_history(student_id).await?;
        let catalogue = self.active_catalogue().await?;
        let stats = DashboardStats::compute(
            catalogue.len() as u64,
            &enrollments,
            certifications.len() as u64,
        );
        Ok(LearnerDashboardView {
            stats,
            recent_enrollments: recent_enrollments(&enrollments, RECENT_ENROLLMENTS_LIMIT),
            recent_certifications: recent_certifications(
                &certifications,
                RECENT_CERTIFICATIONS_LIMIT,
            ),
            recommended_courses: recommended_courses(
                &catalogue,
                &enrollments,
                RECOMMENDED_COURSES_LIMIT,
            ),
            progress: ProgressOverview::compute(&enrollments, self.today()),
        })
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
