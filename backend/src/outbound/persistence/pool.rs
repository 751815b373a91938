//! bb8 pool of `diesel-async` PostgreSQL connections shared by every
//! repository adapter.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::debug;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Failures raised while building the pool or borrowing from it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available before the checkout timeout.
    #[error("database connection unavailable: {message}")]
    Checkout { message: String },

    /// The pool could not be created, usually a malformed URL.
    #[error("database pool could not be created: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Sizing and timeouts for [`DbPool`].
///
/// ```
/// use std::time::Duration;
/// use learnhub::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/learnhub")
///     .with_max_connections(4)
///     .with_checkout_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_url(), "postgres://localhost/learnhub");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_connections: u32,
    checkout_timeout: Duration,
    idle_timeout: Option<Duration>,
}

impl PoolConfig {
    /// Ten connections, a thirty second checkout timeout and idle
    /// connections recycled after ten minutes.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
            idle_timeout: Some(DEFAULT_IDLE_TIMEOUT),
        }
    }

    /// Upper bound on open connections. Zero is raised to one.
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    /// `None` keeps idle connections open indefinitely.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Cloneable handle to the shared connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. Connections are opened lazily on first checkout.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when bb8 rejects the configuration.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_connections,
            checkout_timeout,
            idle_timeout,
        } = config;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

        let inner = Pool::builder()
            .max_size(max_connections)
            .min_idle(None)
            .idle_timeout(idle_timeout)
            .connection_timeout(checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        debug!(max_connections, "database pool ready");
        Ok(Self { inner })
    }

    /// Borrow a connection, returned to the pool when dropped.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when the checkout timeout elapses or a new
    /// connection cannot be established.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_config_uses_service_defaults() {
        let config = PoolConfig::new("postgres://localhost/learnhub");

        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.checkout_timeout, DEFAULT_CHECKOUT_TIMEOUT);
        assert_eq!(config.idle_timeout, Some(DEFAULT_IDLE_TIMEOUT));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(25, 25)]
    fn max_connections_is_at_least_one(#[case] requested: u32, #[case] expected: u32) {
        let config = PoolConfig::new("postgres://localhost/learnhub")
            .with_max_connections(requested);

        assert_eq!(config.max_connections, expected);
    }

    #[rstest]
    fn idle_timeout_can_be_disabled() {
        let config = PoolConfig::new("postgres://localhost/learnhub")
            .with_checkout_timeout(Duration::from_millis(250))
            .with_idle_timeout(None);

        assert_eq!(config.checkout_timeout, Duration::from_millis(250));
        assert_eq!(config.idle_timeout, None);
    }

    #[rstest]
    #[case(PoolError::checkout("timed out"), "database connection unavailable: timed out")]
    #[case(PoolError::build("bad url"), "database pool could not be created: bad url")]
    fn errors_render_their_cause(#[case] error: PoolError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
