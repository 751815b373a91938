//! Port abstraction for certificate lookups.

use async_trait::async_trait;

use crate::domain::{Certification, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by certification adapters.
    pub enum CertificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "certification repository connection failed: {message}" as ServiceUnavailable,
        /// Query failed during execution.
        Query { message: String } => "certification repository query failed: {message}" as InternalError,
    }
}

/// Read access to issued certificates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CertificationRepository: Send + Sync {
    /// Certificates issued for a student's enrollments, newest first.
    async fn list_for_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<Certification>, CertificationRepositoryError>;
}
