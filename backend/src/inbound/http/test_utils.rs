//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::web;
use mockable::Clock;

use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;
use crate::server::memory_http_state;
use crate::test_support::FixedClock;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory backend pinned to 15 June 2026.
pub struct MemoryBackend {
    /// Store shared by every port, for seeding and inspection.
    pub store: Arc<InMemoryStore>,
    /// Handler state wired over `store`.
    pub state: web::Data<HttpState>,
}

impl MemoryBackend {
    /// Fresh, empty backend.
    #[must_use]
    pub fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::on(2026, 6, 15));
        let store = Arc::new(InMemoryStore::new(clock.clone()));
        let state = web::Data::new(memory_http_state(&store, clock));
        Self { store, state }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the `session` cookie set by a response.
///
/// # Panics
/// Panics when the response did not set the cookie.
#[must_use]
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
