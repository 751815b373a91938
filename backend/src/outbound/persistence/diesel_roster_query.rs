//! PostgreSQL-backed `RosterQuery` implementation using Diesel ORM.
//!
//! Learner highlights are computed in two round trips: one for the learner
//! accounts and one for every enrollment those learners hold. The domain's
//! [`EnrollmentHighlights::from_history`] then picks the most recent row.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::{count_distinct, count_star};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{RosterQuery, RosterQueryError};
use crate::domain::{
    AdminSummary, Course, CourseId, CourseLearner, CourseStatus, CourseWithTrainer,
    EnrollmentHighlights, EnrollmentId, EnrollmentSnapshot, LearnerRosterEntry, Role,
    TrainerContact, TrainerRosterEntry, User, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::count_to_u64;
use super::models::{CourseRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, enrollments, roles, trainerscourses, userroles, users};

/// Diesel-backed implementation of the roster query port.
#[derive(Clone)]
pub struct DieselRosterQuery {
    pool: DbPool,
}

impl DieselRosterQuery {
    /// Create a new query adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type ContactColumns = (i64, String, String, String);
type SnapshotColumns = (i64, i64, String, NaiveDate, Option<f64>);

fn map_pool_error(error: PoolError) -> RosterQueryError {
    map_basic_pool_error(error, RosterQueryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RosterQueryError {
    map_basic_diesel_error(error, RosterQueryError::query, RosterQueryError::connection)
}

fn map_user(row: UserRow) -> Result<User, RosterQueryError> {
    User::try_from(row).map_err(|err| RosterQueryError::query(err.to_string()))
}

fn map_course(row: CourseRow) -> Result<Course, RosterQueryError> {
    Course::try_from(row).map_err(|err| RosterQueryError::query(err.to_string()))
}

async fn count_role_holders(
    conn: &mut AsyncPgConnection,
    role: Role,
) -> Result<u64, RosterQueryError> {
    let count = userroles::table
        .inner_join(roles::table)
        .filter(roles::role_name.eq(role.as_str()))
        .select(count_distinct(userroles::user_id))
        .first::<i64>(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(count_to_u64(count))
}

async fn users_with_role(
    conn: &mut AsyncPgConnection,
    role: Role,
) -> Result<Vec<User>, RosterQueryError> {
    let rows: Vec<UserRow> = users::table
        .inner_join(userroles::table.inner_join(roles::table))
        .filter(roles::role_name.eq(role.as_str()))
        .order((users::created_at.desc(), users::id.desc()))
        .select(UserRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    rows.into_iter().map(map_user).collect()
}

async fn enrollment_history(
    conn: &mut AsyncPgConnection,
    student_ids: &[i64],
) -> Result<HashMap<i64, Vec<EnrollmentSnapshot>>, RosterQueryError> {
    let rows: Vec<SnapshotColumns> = enrollments::table
        .inner_join(courses::table)
        .filter(enrollments::student_user_id.eq_any(student_ids))
        .select((
            enrollments::student_user_id,
            enrollments::id,
            courses::title,
            enrollments::enrollment_date,
            enrollments::score,
        ))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut history: HashMap<i64, Vec<EnrollmentSnapshot>> = HashMap::new();
    for (student_id, enrollment_id, course_title, enrollment_date, score) in rows {
        history.entry(student_id).or_default().push(EnrollmentSnapshot {
            enrollment_id: EnrollmentId::from_db(enrollment_id),
            course_title,
            enrollment_date,
            score,
        });
    }
    Ok(history)
}

fn contact_from_columns((id, first_name, last_name, email): ContactColumns) -> TrainerContact {
    TrainerContact {
        user_id: UserId::from_db(id),
        first_name,
        last_name,
        email,
    }
}

#[async_trait]
impl RosterQuery for DieselRosterQuery {
    async fn summary(&self) -> Result<AdminSummary, RosterQueryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total_learners = count_role_holders(&mut conn, Role::Student).await?;
        let total_trainers = count_role_holders(&mut conn, Role::Trainer).await?;
        let total_courses = courses::table
            .select(count_star())
            .first::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let active_courses = courses::table
            .filter(courses::status.eq(CourseStatus::Active.as_str()))
            .select(count_star())
            .first::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(AdminSummary {
            total_learners,
            total_trainers,
            total_courses: count_to_u64(total_courses),
            active_courses: count_to_u64(active_courses),
        })
    }

    async fn learners(&self) -> Result<Vec<LearnerRosterEntry>, RosterQueryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let learners = users_with_role(&mut conn, Role::Student).await?;
        let ids: Vec<i64> = learners.iter().map(|user| user.id.get()).collect();
        let mut history = enrollment_history(&mut conn, &ids).await?;

        Ok(learners
            .into_iter()
            .map(|user| {
                let snapshots = history.remove(&user.id.get()).unwrap_or_default();
                LearnerRosterEntry {
                    highlights: EnrollmentHighlights::from_history(&snapshots),
                    user,
                }
            })
            .collect())
    }

    async fn trainers(&self) -> Result<Vec<TrainerRosterEntry>, RosterQueryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users_with_role(&mut conn, Role::Trainer).await
    }

    async fn courses_with_trainers(&self) -> Result<Vec<CourseWithTrainer>, RosterQueryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(CourseRow, Option<ContactColumns>)> = courses::table
            .left_join(trainerscourses::table.left_join(users::table))
            .order((courses::created_at.desc(), courses::id.desc()))
            .select((
                CourseRow::as_select(),
                (users::id, users::first_name, users::last_name, users::email).nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(course, trainer)| {
                Ok(CourseWithTrainer {
                    course: map_course(course)?,
                    trainer: trainer.map(contact_from_columns),
                })
            })
            .collect()
    }

    async fn course_learners(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseLearner>, RosterQueryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactColumns> = enrollments::table
            .inner_join(users::table)
            .filter(enrollments::course_id.eq(course_id.get()))
            .order((enrollments::enrollment_date.desc(), enrollments::id.desc()))
            .select((users::id, users::first_name, users::last_name, users::email))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, first_name, last_name, email)| CourseLearner {
                user_id: UserId::from_db(id),
                first_name,
                last_name,
                email,
            })
            .collect())
    }
}
