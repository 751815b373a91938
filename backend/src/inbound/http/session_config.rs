//! Session cookie configuration.
//!
//! Turns the session-related [`crate::server::AppSettings`] values into the
//! signing key and cookie flags used by the session middleware. Release
//! builds refuse short keys and only fall back to an ephemeral key when
//! explicitly allowed. Debug builds replace a key too short to derive from
//! with a generated one.

use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use tracing::warn;
use zeroize::Zeroize;

/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Shortest key material `Key::derive_from` accepts.
const DERIVE_MIN_LEN: usize = 32;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing key file.
    Debug,
    /// Release builds require a readable key of at least
    /// [`SESSION_KEY_MIN_LEN`] bytes.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use learnhub::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session inputs taken from configuration.
#[derive(Debug, Clone)]
pub struct SessionInputs {
    /// File holding the key material.
    pub key_file: PathBuf,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Permit a generated key when the file cannot be read.
    pub allow_ephemeral: bool,
}

/// Validated session settings.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Reading the session key file failed and no fallback is permitted.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Resolve session settings for the given build mode.
///
/// # Examples
///
/// ```rust
/// use learnhub::inbound::http::session_config::{BuildMode, SessionInputs, session_settings};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("learnhub_session_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
///
/// let settings = session_settings(
///     SessionInputs {
///         key_file: key_path.clone(),
///         cookie_secure: true,
///         allow_ephemeral: false,
///     },
///     BuildMode::Release,
/// )?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    inputs: SessionInputs,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let SessionInputs {
        key_file,
        cookie_secure,
        allow_ephemeral,
    } = inputs;

    if !cookie_secure && !mode.is_debug() {
        warn!("session cookies are not marked Secure in a release build");
    }

    let key = load_key(&key_file, mode, allow_ephemeral)?;
    Ok(SessionSettings { key, cookie_secure })
}

fn load_key(path: &Path, mode: BuildMode, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if !mode.is_debug() && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            if length < DERIVE_MIN_LEN {
                bytes.zeroize();
                warn!(
                    path = %path.display(),
                    length,
                    "session key too short to derive from; using temporary key (dev only)"
                );
                return Ok(Key::generate());
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}
