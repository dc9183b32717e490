//! Cookie-based session extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use warden_core::error::CoreError;
use warden_core::session::{token_from_cookie_header, SessionCookie};
use warden_db::models::session::Session;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Session token presented by the client in the `session_id` cookie.
///
/// Only extracts; does not validate. A missing cookie is rejected with the
/// generic no-active-session error.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(token_from_cookie_header)
            .map(|token| SessionToken(token.to_string()))
            .ok_or_else(|| AppError::Core(CoreError::no_active_session()))
    }
}

/// Authenticated session: the presented token was valid and has been renewed.
///
/// Handlers taking this must re-issue the cookie with [`session_cookie`].
///
/// ```ignore
/// async fn my_handler(CurrentSession(session): CurrentSession) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %session.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;
        let session = state.sessions.authenticate(&token).await?;
        Ok(CurrentSession(session))
    }
}

/// `Set-Cookie` value for a cookie directive.
pub fn session_cookie(cookie: &SessionCookie) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie header: {e}")))
}
