//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The portal keeps only the learner's id and display name in the cookie.
//! Handlers that need a logged-in learner take an [`AuthenticatedLearner`]
//! argument instead of reading the session themselves.

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::domain::{Error, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const DISPLAY_NAME_KEY: &str = "user_name";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `user` as the logged-in learner.
    pub fn persist_learner(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id.get())
            .and_then(|()| self.0.insert(DISPLAY_NAME_KEY, user.display_name()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current learner id, if present.
    ///
    /// A tampered or stale value is treated as logged out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<i64>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// Display name stored at login.
    pub fn display_name(&self) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(DISPLAY_NAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Require a learner id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Request-scoped proof that a learner is logged in.
///
/// Extraction fails with `401 {"code": "unauthorized", "message": "login
/// required"}` when the session carries no valid user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedLearner(UserId);

impl AuthenticatedLearner {
    /// The learner's account id.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.0
    }
}

impl FromRequest for AuthenticatedLearner {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = SessionContext::new(req.get_session());
        ready(session.require_user_id().map(Self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use crate::test_support::sample_user;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/login",
                web::get().to(|session: SessionContext| async move {
                    session.persist_learner(&sample_user(7, "ada@example.org"))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/me",
                web::get().to(|learner: AuthenticatedLearner| async move {
                    HttpResponse::Ok().body(learner.user_id().to_string())
                }),
            )
            .route(
                "/name",
                web::get().to(|session: SessionContext| async move {
                    let name = session.display_name()?.unwrap_or_default();
                    Ok::<_, Error>(HttpResponse::Ok().body(name))
                }),
            )
            .route(
                "/tamper",
                web::get().to(|session: Session| async move {
                    session.insert(USER_ID_KEY, -3_i64).expect("insert");
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/logout",
                web::get().to(|session: SessionContext| async move {
                    session.purge();
                    HttpResponse::Ok()
                }),
            )
    }

    #[actix_web::test]
    async fn logged_in_learner_is_extracted() {
        let app = actix_test::init_service(session_test_app()).await;

        let login = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/login").to_request())
            .await;
        let cookie = session_cookie(&login);

        let me = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/me")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(me).await, "7");

        let name = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/name").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(actix_test::read_body(name).await, "ada User");
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorised() {
        let app = actix_test::init_service(session_test_app()).await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/me").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::Unauthorized);
        assert_eq!(body.message(), "login required");
    }

    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised() {
        let app = actix_test::init_service(session_test_app()).await;

        let tamper =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/tamper").to_request()).await;
        let cookie = session_cookie(&tamper);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn purge_expires_the_cookie() {
        let app = actix_test::init_service(session_test_app()).await;
        let login = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/login").to_request())
            .await;
        let cookie = session_cookie(&login);

        let logout = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let removal = session_cookie(&logout);

        assert_eq!(removal.value(), "");
    }
}
