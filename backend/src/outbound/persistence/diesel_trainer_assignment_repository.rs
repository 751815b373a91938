//! PostgreSQL-backed `TrainerAssignmentRepository` implementation using
//! Diesel ORM.
//!
//! Replacing a course's trainer runs the delete and insert inside one
//! transaction. The `trainerscourses_course_id_key` unique index rejects a
//! concurrent writer that slips in between.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{TrainerAssignmentRepository, TrainerAssignmentRepositoryError};
use crate::domain::{CourseId, TrainerAssignment, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{NewTrainerAssignmentRow, TrainerAssignmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::trainerscourses;

/// Diesel-backed implementation of the trainer assignment repository port.
#[derive(Clone)]
pub struct DieselTrainerAssignmentRepository {
    pool: DbPool,
}

impl DieselTrainerAssignmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TrainerAssignmentRepositoryError {
    map_basic_pool_error(error, TrainerAssignmentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TrainerAssignmentRepositoryError {
    map_basic_diesel_error(
        error,
        TrainerAssignmentRepositoryError::query,
        TrainerAssignmentRepositoryError::connection,
    )
}

/// Map a failed replace transaction, recognising the one-trainer-per-course
/// unique index.
fn map_replace_error(
    error: diesel::result::Error,
    course_id: CourseId,
) -> TrainerAssignmentRepositoryError {
    if unique_violation(&error).is_some() {
        return TrainerAssignmentRepositoryError::duplicate(course_id);
    }
    map_diesel_error(error)
}

fn pair_filter(
    course_id: CourseId,
    trainer_id: UserId,
) -> diesel::dsl::And<
    diesel::dsl::Eq<trainerscourses::course_id, i64>,
    diesel::dsl::Eq<trainerscourses::trainer_user_id, i64>,
> {
    trainerscourses::course_id
        .eq(course_id.get())
        .and(trainerscourses::trainer_user_id.eq(trainer_id.get()))
}

#[async_trait]
impl TrainerAssignmentRepository for DieselTrainerAssignmentRepository {
    async fn exists(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
    ) -> Result<bool, TrainerAssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            trainerscourses::table.filter(pair_filter(course_id, trainer_id)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn replace_for_course(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
        assignment_date: NaiveDate,
    ) -> Result<TrainerAssignment, TrainerAssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewTrainerAssignmentRow {
            trainer_user_id: trainer_id.get(),
            course_id: course_id.get(),
            assignment_date,
        };

        let (replaced, row) = conn
            .transaction(|conn| {
                async move {
                    let replaced = diesel::delete(
                        trainerscourses::table
                            .filter(trainerscourses::course_id.eq(new_row.course_id)),
                    )
                    .execute(conn)
                    .await?;
                    let row = diesel::insert_into(trainerscourses::table)
                        .values(&new_row)
                        .returning(TrainerAssignmentRow::as_returning())
                        .get_result::<TrainerAssignmentRow>(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((replaced, row))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_replace_error(err, course_id))?;

        debug!(
            course_id = course_id.get(),
            trainer_id = trainer_id.get(),
            replaced,
            "replaced course trainer assignment"
        );
        Ok(TrainerAssignment::from(row))
    }

    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<TrainerAssignment>, TrainerAssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TrainerAssignmentRow> = trainerscourses::table
            .filter(trainerscourses::course_id.eq(course_id.get()))
            .order(trainerscourses::id.desc())
            .select(TrainerAssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(TrainerAssignment::from).collect())
    }

    async fn list_for_trainer(
        &self,
        trainer_id: UserId,
    ) -> Result<Vec<TrainerAssignment>, TrainerAssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TrainerAssignmentRow> = trainerscourses::table
            .filter(trainerscourses::trainer_user_id.eq(trainer_id.get()))
            .order((
                trainerscourses::assignment_date.desc(),
                trainerscourses::id.desc(),
            ))
            .select(TrainerAssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(TrainerAssignment::from).collect())
    }

    async fn delete(
        &self,
        course_id: CourseId,
        trainer_id: UserId,
    ) -> Result<bool, TrainerAssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(trainerscourses::table.filter(pair_filter(course_id, trainer_id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_service_unavailable() {
        let err = map_pool_error(PoolError::checkout("timed out"));

        assert!(matches!(
            err,
            TrainerAssignmentRepositoryError::Connection { .. }
        ));
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));

        assert!(matches!(
            err,
            TrainerAssignmentRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn racing_replace_maps_to_duplicate() {
        let course_id = CourseId::new(7).expect("valid id");

        let err = map_replace_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key value violates unique constraint".to_owned()),
            ),
            course_id,
        );

        assert_eq!(err, TrainerAssignmentRepositoryError::duplicate(course_id));
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    fn failed_replace_without_violation_is_a_query_error() {
        let err = map_replace_error(
            DieselError::RollbackTransaction,
            CourseId::new(7).expect("valid id"),
        );

        assert!(matches!(err, TrainerAssignmentRepositoryError::Query { .. }));
    }
}
