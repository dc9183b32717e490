//! Route definitions for the `/user` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{method_not_allowed, user};
use crate::state::AppState;

/// ```text
/// GET /user  -> current_user (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/user",
        get(user::current_user).fallback(method_not_allowed),
    )
}
