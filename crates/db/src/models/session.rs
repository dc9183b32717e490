//! Login session model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use warden_core::types::{DbId, Timestamp};

/// A row from the `sessions` table.
///
/// `token` is the bearer credential; it is returned to the session's owner
/// and must never be logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Session {
    pub id: DbId,
    pub token: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new session.
#[derive(Debug)]
pub struct CreateSession {
    pub user_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
}
