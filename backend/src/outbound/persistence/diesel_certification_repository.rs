//! PostgreSQL-backed `CertificationRepository` implementation using Diesel
//! ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CertificationRepository, CertificationRepositoryError};
use crate::domain::{Certification, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::CertificationRow;
use super::pool::{DbPool, PoolError};
use super::schema::{certifications, enrollments};

/// Diesel-backed implementation of the certification repository port.
#[derive(Clone)]
pub struct DieselCertificationRepository {
    pool: DbPool,
}

impl DieselCertificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CertificationRepositoryError {
    map_basic_pool_error(error, CertificationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CertificationRepositoryError {
    map_basic_diesel_error(
        error,
        CertificationRepositoryError::query,
        CertificationRepositoryError::connection,
    )
}

#[async_trait]
impl CertificationRepository for DieselCertificationRepository {
    async fn list_for_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<Certification>, CertificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CertificationRow> = certifications::table
            .inner_join(enrollments::table)
            .filter(enrollments::student_user_id.eq(student_id.get()))
            .order((certifications::issue_date.desc(), certifications::id.desc()))
            .select(CertificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Certification::from).collect())
    }
}
