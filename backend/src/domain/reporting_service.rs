//! Admin reporting service implementing [`AdminReporting`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{AdminReporting, CourseRepository, RosterQuery};
use crate::domain::{
    AdminSummary, CourseId, CourseLearner, CourseWithTrainer, Error, LearnerRosterEntry,
    TrainerRosterEntry,
};

/// Roster projections for the admin console.
#[derive(Clone)]
pub struct AdminReportingService<Q, C> {
    rosters: Arc<Q>,
    courses: Arc<C>,
}

impl<Q, C> AdminReportingService<Q, C> {
    /// Create the service over the roster query and course store.
    pub const fn new(rosters: Arc<Q>, courses: Arc<C>) -> Self {
        Self { rosters, courses }
    }
}

#[async_trait]
impl<Q, C> AdminReporting for AdminReportingService<Q, C>
where
    Q: RosterQuery,
    C: CourseRepository,
{
    async fn summary(&self) -> Result<AdminSummary, Error> {
        Ok(self.rosters.summary().await?)
    }

    async fn learners(&self) -> Result<Vec<LearnerRosterEntry>, Error> {
        Ok(self.rosters.learners().await?)
    }

    async fn trainers(&self) -> Result<Vec<TrainerRosterEntry>, Error> {
        Ok(self.rosters.trainers().await?)
    }

    async fn courses_with_trainers(&self) -> Result<Vec<CourseWithTrainer>, Error> {
        Ok(self.rosters.courses_with_trainers().await?)
    }

    async fn course_learners(&self, course_id: CourseId) -> Result<Vec<CourseLearner>, Error> {
        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(Error::not_found(format!("course {course_id} not found")));
        }
        Ok(self.rosters.course_learners(course_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CourseStatus;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockCourseRepository, MockRosterQuery, RosterQueryError};
    use crate::test_support::sample_course;

    fn course_id() -> CourseId {
        CourseId::new(8).expect("valid id")
    }

    #[tokio::test]
    async fn course_learners_of_missing_course_is_not_found() {
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().return_once(|_| Ok(None));
        let mut rosters = MockRosterQuery::new();
        rosters.expect_course_learners().never();

        let service = AdminReportingService::new(Arc::new(rosters), Arc::new(courses));
        let err = service
            .course_learners(course_id())
            .await
            .expect_err("missing course");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn course_learners_delegates_to_roster_query() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .return_once(|id| Ok(Some(sample_course(id.get(), CourseStatus::Active))));
        let mut rosters = MockRosterQuery::new();
        rosters.expect_course_learners().return_once(|_| Ok(Vec::new()));

        let service = AdminReportingService::new(Arc::new(rosters), Arc::new(courses));
        let learners = service
            .course_learners(course_id())
            .await
            .expect("learners load");
        assert!(learners.is_empty());
    }

    #[tokio::test]
    async fn query_failures_are_internal_errors() {
        let mut rosters = MockRosterQuery::new();
        rosters
            .expect_summary()
            .return_once(|| Err(RosterQueryError::query("syntax error")));

        let service =
            AdminReportingService::new(Arc::new(rosters), Arc::new(MockCourseRepository::new()));
        let err = service.summary().await.expect_err("query fails");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
