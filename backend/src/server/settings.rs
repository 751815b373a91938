//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LEARNHUB_*` environment variables and an
//! optional configuration file, in that order of precedence. Boolean
//! switches have no CLI flag and come from the environment or the file.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// `db_max_connections` is zero.
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
}

/// Runtime configuration for the `learnhub` server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEARNHUB")]
pub struct AppSettings {
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections; defaults to 10.
    pub db_max_connections: Option<u32>,
    /// Session key file; defaults to `/var/run/secrets/session_key`.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`; defaults to true.
    #[ortho_config(skip_cli)]
    pub session_cookie_secure: Option<bool>,
    /// Generate a throwaway session key when the key file is unreadable.
    #[ortho_config(default = false, skip_cli)]
    pub session_allow_ephemeral: bool,
    /// Apply pending migrations at startup; defaults to true.
    #[ortho_config(skip_cli)]
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool size, rejecting zero.
    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(SettingsError::ZeroConnections),
            size => Ok(size),
        }
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn session_cookie_secure(&self) -> bool {
        self.session_cookie_secure.unwrap_or(true)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
