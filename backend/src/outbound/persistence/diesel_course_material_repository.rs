//! PostgreSQL-backed `CourseMaterialRepository` implementation using Diesel
//! ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseMaterialRepository, CourseMaterialRepositoryError};
use crate::domain::{CourseId, CourseMaterial, MaterialId, NewCourseMaterial};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CourseMaterialRow, NewCourseMaterialRow};
use super::pool::{DbPool, PoolError};
use super::schema::coursematerials;

/// Diesel-backed implementation of the course material repository port.
#[derive(Clone)]
pub struct DieselCourseMaterialRepository {
    pool: DbPool,
}

impl DieselCourseMaterialRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseMaterialRepositoryError {
    map_basic_pool_error(error, CourseMaterialRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CourseMaterialRepositoryError {
    map_basic_diesel_error(
        error,
        CourseMaterialRepositoryError::query,
        CourseMaterialRepositoryError::connection,
    )
}

#[async_trait]
impl CourseMaterialRepository for DieselCourseMaterialRepository {
    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseMaterial>, CourseMaterialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseMaterialRow> = coursematerials::table
            .filter(coursematerials::course_id.eq(course_id.get()))
            .order((coursematerials::created_at.asc(), coursematerials::id.asc()))
            .select(CourseMaterialRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(CourseMaterial::from).collect())
    }

    async fn create(
        &self,
        course_id: CourseId,
        material: &NewCourseMaterial,
    ) -> Result<CourseMaterial, CourseMaterialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(coursematerials::table)
            .values(NewCourseMaterialRow::new(course_id, material))
            .returning(CourseMaterialRow::as_returning())
            .get_result::<CourseMaterialRow>(&mut conn)
            .await
            .map(CourseMaterial::from)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: MaterialId) -> Result<bool, CourseMaterialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(coursematerials::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
