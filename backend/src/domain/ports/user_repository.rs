//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}" as InternalError,
        /// Another account already uses the email.
        DuplicateEmail { email: String } => "an account already exists for {email}" as Conflict,
    }
}

/// Accounts and their role grants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by login address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;

    /// Insert the account and grant its role atomically.
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError>;
}
