//! Handler for `/user`: the identity behind the presented session.

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, SET_COOKIE};
use axum::http::{HeaderName, HeaderValue};
use axum::Json;
use warden_core::session::{SessionCookie, NO_STORE_CACHE_CONTROL};
use warden_db::models::user::UserResponse;

use crate::error::AppResult;
use crate::middleware::auth::{session_cookie, CurrentSession};
use crate::state::AppState;

/// GET /api/v1/user
///
/// Validates and renews the session, re-issues the cookie, and returns the
/// owning identity. Never cacheable, since every call moves the session expiry.
pub async fn current_user(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<([(HeaderName, HeaderValue); 2], Json<UserResponse>)> {
    let user = state.identities.find_one_by_id(session.user_id).await?;

    let cookie = session_cookie(&SessionCookie::issue(&session.token))?;
    Ok((
        [
            (SET_COOKIE, cookie),
            (
                CACHE_CONTROL,
                HeaderValue::from_static(NO_STORE_CACHE_CONTROL),
            ),
        ],
        Json(user.into()),
    ))
}
