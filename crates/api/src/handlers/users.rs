//! Handlers for the `/users` resource (registration, lookup, update).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use warden_core::session::SessionCookie;
use warden_db::models::user::UserResponse;

use crate::auth::identity::{IdentityChanges, NewIdentity};
use crate::error::AppResult;
use crate::middleware::auth::{session_cookie, CurrentSession};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 30))]
    pub username: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 72))]
    pub password: String,
}

/// Request body for `PATCH /users/{username}`. Absent fields are unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 30))]
    pub username: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 72))]
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Register a new identity. Returns the safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let Json(input) = body?;
    input.validate()?;

    let user = state
        .identities
        .create(NewIdentity {
            username: input.username,
            email: input.email,
            password: input.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users/{username}
///
/// Public, case-insensitive lookup.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.identities.find_one_by_username(&username).await?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/{username}
///
/// Apply partial changes. Requires an active session, which is renewed and
/// re-issued to the client.
///
/// No ownership check: any active session may update any identity.
pub async fn update_user(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(username): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AppResult<([(HeaderName, HeaderValue); 1], Json<UserResponse>)> {
    let Json(input) = body?;
    input.validate()?;

    let user = state
        .identities
        .update(
            &username,
            IdentityChanges {
                username: input.username,
                email: input.email,
                password: input.password,
            },
        )
        .await?;

    let cookie = session_cookie(&SessionCookie::issue(&session.token))?;
    Ok(([(SET_COOKIE, cookie)], Json(user.into())))
}
