//! Route and handler for `/status`: service time and database health.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use warden_core::types::Timestamp;
use warden_db::status::DatabaseStatus;

use crate::error::AppResult;
use crate::handlers::method_not_allowed;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// When this report was produced, per the application clock.
    pub updated_at: Timestamp,
    pub dependencies: Dependencies,
}

#[derive(Debug, Serialize)]
pub struct Dependencies {
    pub database: DatabaseStatus,
}

/// GET /api/v1/status
///
/// A database that cannot be queried is reported as an internal error.
async fn status(State(state): State<AppState>) -> AppResult<Json<StatusResponse>> {
    let database = warden_db::status::database_status(&state.pool).await?;

    Ok(Json(StatusResponse {
        updated_at: state.clock.now(),
        dependencies: Dependencies { database },
    }))
}

/// ```text
/// GET /status  -> status
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(status).fallback(method_not_allowed))
}
