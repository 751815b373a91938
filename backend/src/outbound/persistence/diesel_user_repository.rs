//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Account creation inserts the user and its role grant in one transaction,
//! so a learner never exists without the Student role.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, EmailValidationError, NewUser, User, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{roles, userroles, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn map_row(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from(row)
        .map_err(|err: EmailValidationError| UserRepositoryError::query(err.to_string()))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.get()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(map_row).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(map_row).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow::from(user);
        let role_name = user.role.as_str();

        let row = conn
            .transaction(|conn| {
                async move {
                    let row = diesel::insert_into(users::table)
                        .values(&new_row)
                        .returning(UserRow::as_returning())
                        .get_result::<UserRow>(conn)
                        .await?;
                    let role_id = roles::table
                        .filter(roles::role_name.eq(role_name))
                        .select(roles::id)
                        .first::<i64>(conn)
                        .await?;
                    diesel::insert_into(userroles::table)
                        .values((userroles::user_id.eq(row.id), userroles::role_id.eq(role_id)))
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| {
                if unique_violation(&err).is_some() {
                    UserRepositoryError::duplicate_email(user.email.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;

        debug!(user_id = row.id, role = role_name, "inserted user with role grant");
        map_row(row)
    }
}
