//! Driving port for learner sign-in.
//!
//! The portal identifies learners by email alone. Unknown addresses are
//! registered on first login with the Student role.

use async_trait::async_trait;

use crate::domain::{Email, Error, User};

/// Email-only login with signup on first use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearnerAccounts: Send + Sync {
    /// Return the account for `email`, creating a Student account if needed.
    async fn login(&self, email: &Email) -> Result<User, Error>;

    /// Look an account up without creating one.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, Error>;
}
