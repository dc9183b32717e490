//! Handlers for the `/sessions` resource (login, logout).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use warden_core::session::SessionCookie;
use warden_db::models::session::Session;

use crate::error::AppResult;
use crate::middleware::auth::{session_cookie, SessionToken};
use crate::state::AppState;

/// Request body for `POST /sessions`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 72))]
    pub password: String,
}

/// POST /api/v1/sessions
///
/// Authenticate with email + password and open a session. The token is set
/// as the `session_id` cookie and echoed in the body.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(StatusCode, [(HeaderName, HeaderValue); 1], Json<Session>)> {
    let Json(input) = body?;
    input.validate()?;

    let user = state
        .identities
        .authenticate(&input.email, &input.password)
        .await?;
    let session = state.sessions.create(user.id).await?;

    let cookie = session_cookie(&SessionCookie::issue(&session.token))?;
    Ok((StatusCode::CREATED, [(SET_COOKIE, cookie)], Json(session)))
}

/// DELETE /api/v1/sessions
///
/// Revoke the presented session. Returns the session as it was before
/// deletion and tells the client to drop its cookie.
pub async fn logout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> AppResult<([(HeaderName, HeaderValue); 1], Json<Session>)> {
    let session = state.sessions.find_one_valid_by_token(&token).await?;
    let revoked = state.sessions.revoke(&session).await?;

    let cookie = session_cookie(&SessionCookie::clear())?;
    Ok(([(SET_COOKIE, cookie)], Json(revoked)))
}
