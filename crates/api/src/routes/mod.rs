pub mod sessions;
pub mod status;
pub mod user;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                 create (public)
/// /users/{username}      get (public), patch (requires session)
///
/// /sessions              login (public), logout (requires session)
///
/// /user                  current identity (requires session, renews it)
///
/// /status                server time and database health (public)
/// ```
///
/// Every path answers unsupported methods with `405 MethodNotAllowedError`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(sessions::router())
        .merge(user::router())
        .merge(status::router())
}
