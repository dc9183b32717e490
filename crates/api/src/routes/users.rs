//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{method_not_allowed, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST  /users              -> create_user
/// GET   /users/{username}   -> get_user
/// PATCH /users/{username}   -> update_user (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            post(users::create_user).fallback(method_not_allowed),
        )
        .route(
            "/users/{username}",
            get(users::get_user)
                .patch(users::update_user)
                .fallback(method_not_allowed),
        )
}
