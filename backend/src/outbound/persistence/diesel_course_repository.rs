//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.
//!
//! Listings are ordered newest first (`created_at DESC, id DESC`). Filters are
//! composed onto a boxed query so each criterion is only applied when set.

use async_trait::async_trait;
use diesel::dsl::{count_star, now};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseFilter, CourseId, CourseStatus, PageRequest};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{contains_pattern, count_to_u64};
use super::models::{CourseRow, CourseValues};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel-backed implementation of the course repository port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    map_basic_pool_error(error, CourseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_basic_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

fn map_rows(rows: Vec<CourseRow>) -> Result<Vec<Course>, CourseRepositoryError> {
    rows.into_iter().map(map_row).collect()
}

fn map_row(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    Course::try_from(row).map_err(|err| CourseRepositoryError::query(err.to_string()))
}

fn filtered<'a>(
    status: Option<CourseStatus>,
    filter: &'a CourseFilter,
) -> courses::BoxedQuery<'a, Pg> {
    let mut query = courses::table.into_boxed();
    if let Some(status) = status {
        query = query.filter(courses::status.eq(status.as_str()));
    }
    if let Some(category) = filter.category() {
        query = query.filter(courses::category.eq(category));
    }
    if let Some(level) = filter.level() {
        query = query.filter(courses::level.eq(level.as_str()));
    }
    if let Some(keyword) = filter.keyword() {
        let pattern = contains_pattern(keyword);
        query = query.filter(
            courses::title
                .ilike(pattern.clone())
                .or(courses::description.ilike(pattern)),
        );
    }
    query
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = courses::table
            .find(id.get())
            .select(CourseRow::as_select())
            .first::<CourseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(map_row).transpose()
    }

    async fn list(
        &self,
        status: Option<CourseStatus>,
        filter: &CourseFilter,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseRow> = filtered(status, filter)
            .order((courses::created_at.desc(), courses::id.desc()))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        map_rows(rows)
    }

    async fn page(
        &self,
        status: CourseStatus,
        request: PageRequest,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let offset = i64::try_from(request.offset())
            .map_err(|_| CourseRepositoryError::query("page offset out of range"))?;

        let rows: Vec<CourseRow> = courses::table
            .filter(courses::status.eq(status.as_str()))
            .order((courses::created_at.desc(), courses::id.desc()))
            .limit(i64::from(request.size()))
            .offset(offset)
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        map_rows(rows)
    }

    async fn count(&self, status: Option<CourseStatus>) -> Result<u64, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = courses::table.select(count_star()).into_boxed();
        if let Some(status) = status {
            query = query.filter(courses::status.eq(status.as_str()));
        }
        let count = query
            .first::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count_to_u64(count))
    }

    async fn categories(&self) -> Result<Vec<String>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<Option<String>> = courses::table
            .select(courses::category)
            .filter(courses::category.is_not_null())
            .distinct()
            .order(courses::category.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut categories: Vec<String> = rows
            .into_iter()
            .flatten()
            .map(|category| category.trim().to_owned())
            .filter(|category| !category.is_empty())
            .collect();
        categories.dedup();
        Ok(categories)
    }

    async fn create(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(courses::table)
            .values(CourseValues::from(draft))
            .returning(CourseRow::as_returning())
            .get_result::<CourseRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        map_row(row)
    }

    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(courses::table.find(id.get()))
            .set((CourseValues::from(draft), courses::updated_at.eq(now)))
            .returning(CourseRow::as_returning())
            .get_result::<CourseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(map_row).transpose()
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(courses::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
