//! Identity entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warden_core::identity::ExistingIdentifiers;
use warden_core::types::{DbId, Timestamp};

/// Full row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe identity representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for inserting a new identity. The password is already hashed.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Full set of mutable columns written by an update.
#[derive(Debug)]
pub struct UpdateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Login identifiers of a row matched by the uniqueness pre-check.
#[derive(Debug, Clone, FromRow)]
pub struct UserIdentifiers {
    pub username: String,
    pub email: String,
}

impl From<UserIdentifiers> for ExistingIdentifiers {
    fn from(row: UserIdentifiers) -> Self {
        Self {
            username: row.username,
            email: row.email,
        }
    }
}
