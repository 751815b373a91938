//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! The `enrollments_student_course_key` unique index is the final arbiter of
//! duplicate enrollments; violations surface as
//! [`EnrollmentRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{
    Course, CourseId, CourseSummary, Enrollment, EnrollmentDetail, EnrollmentId,
    EnrollmentStatus, NewEnrollment, UserId,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{CourseRow, EnrollmentRow, EnrollmentValues};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, enrollments};

/// Diesel-backed implementation of the enrollment repository port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    map_basic_pool_error(error, EnrollmentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EnrollmentRepositoryError {
    map_basic_diesel_error(
        error,
        EnrollmentRepositoryError::query,
        EnrollmentRepositoryError::connection,
    )
}

/// Map write failures, recognising the (student, course) unique index.
fn map_write_error(
    error: diesel::result::Error,
    enrollment: &NewEnrollment,
) -> EnrollmentRepositoryError {
    if unique_violation(&error).is_some() {
        return EnrollmentRepositoryError::duplicate(enrollment.student_id, enrollment.course_id);
    }
    map_diesel_error(error)
}

fn map_row(row: EnrollmentRow) -> Result<Enrollment, EnrollmentRepositoryError> {
    Enrollment::try_from(row).map_err(|err| EnrollmentRepositoryError::query(err.to_string()))
}

fn map_rows(rows: Vec<EnrollmentRow>) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
    rows.into_iter().map(map_row).collect()
}

fn map_detail(
    (enrollment, course): (EnrollmentRow, CourseRow),
) -> Result<EnrollmentDetail, EnrollmentRepositoryError> {
    let course = Course::try_from(course)
        .map_err(|err| EnrollmentRepositoryError::query(err.to_string()))?;
    Ok(EnrollmentDetail {
        enrollment: map_row(enrollment)?,
        course: CourseSummary::from(&course),
    })
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn find_by_id(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = enrollments::table
            .find(id.get())
            .select(EnrollmentRow::as_select())
            .first::<EnrollmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(map_row).transpose()
    }

    async fn find_for_student_and_course(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = enrollments::table
            .filter(
                enrollments::student_user_id
                    .eq(student_id.get())
                    .and(enrollments::course_id.eq(course_id.get())),
            )
            .select(EnrollmentRow::as_select())
            .first::<EnrollmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EnrollmentRow> = enrollments::table
            .order((enrollments::enrollment_date.desc(), enrollments::id.desc()))
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        map_rows(rows)
    }

    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::course_id.eq(course_id.get()))
            .order((enrollments::enrollment_date.desc(), enrollments::id.desc()))
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        map_rows(rows)
    }

    async fn details_for_student(
        &self,
        student_id: UserId,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<EnrollmentDetail>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = enrollments::table
            .inner_join(courses::table)
            .filter(enrollments::student_user_id.eq(student_id.get()))
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(enrollments::status.eq(status.as_str()));
        }
        let rows: Vec<(EnrollmentRow, CourseRow)> = query
            .order((enrollments::enrollment_date.desc(), enrollments::id.desc()))
            .select((EnrollmentRow::as_select(), CourseRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(map_detail).collect()
    }

    async fn create(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(enrollments::table)
            .values(EnrollmentValues::from(enrollment))
            .returning(EnrollmentRow::as_returning())
            .get_result::<EnrollmentRow>(&mut conn)
            .await
            .map_err(|err| map_write_error(err, enrollment))?;

        map_row(row)
    }

    async fn update(
        &self,
        id: EnrollmentId,
        enrollment: &NewEnrollment,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(enrollments::table.find(id.get()))
            .set(EnrollmentValues::from(enrollment))
            .returning(EnrollmentRow::as_returning())
            .get_result::<EnrollmentRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, enrollment))?;

        row.map(map_row).transpose()
    }

    async fn delete(&self, id: EnrollmentId) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(enrollments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
