//! Learner portal login and logout.
//!
//! Login is email-only: an unknown address creates a Student account on the
//! spot.
//!
//! ```text
//! GET  /login
//! POST /login {"email":"ada@example.org"}
//! GET  /logout
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::{Email, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const EMAIL: FieldName = FieldName::new("email");

/// Login body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
}

/// Who, if anyone, the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl SessionStatus {
    fn logged_out() -> Self {
        Self {
            logged_in: false,
            user_id: None,
            user_name: None,
        }
    }
}

fn parse_email(raw: String) -> Result<Email, Error> {
    Email::new(&raw).map_err(|err| {
        warn!(error = %err, "rejected login email");
        Error::invalid_value("email", "Please enter a valid email address.")
    })
}

/// Report the current session.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Session status", body = SessionStatus)),
    tags = ["portal"],
    operation_id = "sessionStatus",
    security([])
)]
#[get("/login")]
pub async fn session_status(session: SessionContext) -> ApiResult<web::Json<SessionStatus>> {
    let Some(user_id) = session.user_id()? else {
        return Ok(web::Json(SessionStatus::logged_out()));
    };
    Ok(web::Json(SessionStatus {
        logged_in: true,
        user_id: Some(user_id),
        user_name: session.display_name()?,
    }))
}

/// Log in by email, creating the account on first use.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Logged in",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = SessionStatus
        ),
        (status = 400, description = "Invalid email", body = Error)
    ),
    tags = ["portal"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionStatus>> {
    let email = parse_email(require(payload.into_inner().email, EMAIL)?)?;
    let user = state.accounts.login(&email).await?;
    session.persist_learner(&user)?;
    info!(user_id = %user.id, "learner logged in");
    Ok(web::Json(SessionStatus {
        logged_in: true,
        user_id: Some(user.id),
        user_name: Some(user.display_name()),
    }))
}

/// Clear the session.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 200, description = "Logged out", body = SessionStatus)),
    tags = ["portal"],
    operation_id = "logout",
    security([])
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> web::Json<SessionStatus> {
    session.purge();
    web::Json(SessionStatus::logged_out())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("ada.example.org")]
    #[case("   ")]
    fn addresses_without_at_sign_are_rejected(#[case] raw: &str) {
        let err = parse_email(raw.to_owned()).expect_err("invalid email");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Please enter a valid email address.");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "email", "code": "invalid_value"}))
        );
    }

    #[rstest]
    fn logged_out_status_omits_the_user() {
        let value = serde_json::to_value(SessionStatus::logged_out()).expect("serialise");
        assert_eq!(value, json!({"loggedIn": false}));
    }
}
