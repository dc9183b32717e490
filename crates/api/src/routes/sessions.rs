//! Route definitions for the `/sessions` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::{method_not_allowed, sessions};
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// POST   /sessions  -> login
/// DELETE /sessions  -> logout (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/sessions",
        post(sessions::login)
            .delete(sessions::logout)
            .fallback(method_not_allowed),
    )
}
