//! Roster projections over [`InMemoryStore`].

use std::cmp::Reverse;

use async_trait::async_trait;

use crate::domain::ports::{RosterQuery, RosterQueryError};
use crate::domain::{
    AdminSummary, Course, CourseId, CourseLearner, CourseStatus, CourseWithTrainer, Enrollment,
    EnrollmentHighlights, EnrollmentSnapshot, LearnerRosterEntry, Role, TrainerContact,
    TrainerRosterEntry, User, sort_newest_users_first,
};

use super::{InMemoryStore, State};

fn snapshots_for(state: &State, student: &User) -> Vec<EnrollmentSnapshot> {
    state
        .enrollments
        .values()
        .filter(|enrollment| enrollment.student_id == student.id)
        .filter_map(|enrollment| {
            let course = state.courses.get(&enrollment.course_id.get())?;
            Some(EnrollmentSnapshot {
                enrollment_id: enrollment.id,
                course_title: course.title.clone(),
                enrollment_date: enrollment.enrollment_date,
                score: enrollment.score,
            })
        })
        .collect()
}

#[async_trait]
impl RosterQuery for InMemoryStore {
    async fn summary(&self) -> Result<AdminSummary, RosterQueryError> {
        let state = self.lock();
        Ok(AdminSummary {
            total_learners: state.users_with_role(Role::Student).len() as u64,
            total_trainers: state.users_with_role(Role::Trainer).len() as u64,
            total_courses: state.courses.len() as u64,
            active_courses: state
                .courses
                .values()
                .filter(|course| course.status == CourseStatus::Active)
                .count() as u64,
        })
    }

    async fn learners(&self) -> Result<Vec<LearnerRosterEntry>, RosterQueryError> {
        let state = self.lock();
        let mut learners = state.users_with_role(Role::Student);
        sort_newest_users_first(&mut learners);
        Ok(learners
            .into_iter()
            .map(|user| LearnerRosterEntry {
                highlights: EnrollmentHighlights::from_history(&snapshots_for(&state, &user)),
                user,
            })
            .collect())
    }

    async fn trainers(&self) -> Result<Vec<TrainerRosterEntry>, RosterQueryError> {
        let mut trainers = self.lock().users_with_role(Role::Trainer);
        sort_newest_users_first(&mut trainers);
        Ok(trainers)
    }

    async fn courses_with_trainers(&self) -> Result<Vec<CourseWithTrainer>, RosterQueryError> {
        let state = self.lock();
        let mut courses: Vec<Course> = state.courses.values().cloned().collect();
        courses.sort_by_key(|course| Reverse((course.created_at, course.id)));
        Ok(courses
            .into_iter()
            .map(|course| {
                let trainer = state
                    .assignments
                    .values()
                    .find(|assignment| assignment.course_id == course.id)
                    .and_then(|assignment| state.users.get(&assignment.trainer_id.get()))
                    .map(TrainerContact::from);
                CourseWithTrainer { course, trainer }
            })
            .collect())
    }

    async fn course_learners(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseLearner>, RosterQueryError> {
        let state = self.lock();
        let mut enrollments: Vec<&Enrollment> = state
            .enrollments
            .values()
            .filter(|enrollment| enrollment.course_id == course_id)
            .collect();
        enrollments.sort_by_key(|enrollment| Reverse((enrollment.enrollment_date, enrollment.id)));
        Ok(enrollments
            .into_iter()
            .filter_map(|enrollment| state.users.get(&enrollment.student_id.get()))
            .map(|user| CourseLearner {
                user_id: user.id,
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                email: user.email.to_string(),
            })
            .collect())
    }
}
