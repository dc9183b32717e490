//! Repository for the `sessions` table.
//!
//! Validity is always judged against a caller-supplied `now` so expiry is
//! governed by the application clock, not the database clock.

use sqlx::PgPool;
use warden_core::types::{DbId, Timestamp};

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, token, user_id, expires_at, created_at, updated_at";

/// Provides persistence operations for login sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session stamped with `now`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSession,
        now: Timestamp,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (token, user_id, expires_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.token)
            .bind(input.user_id)
            .bind(input.expires_at)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a session by exact token, only if it has not expired at `now`.
    pub async fn find_valid_by_token(
        pool: &PgPool,
        token: &str,
        now: Timestamp,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE token = $1
               AND expires_at > $2
             LIMIT 1"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(token)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Move a session's expiry and bump `updated_at`.
    ///
    /// Returns `None` if the row no longer exists (e.g. revoked concurrently).
    pub async fn renew(
        pool: &PgPool,
        id: DbId,
        expires_at: Timestamp,
        now: Timestamp,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions SET
                expires_at = $2,
                updated_at = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(expires_at)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Delete a session, returning the row as it was before deletion.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("DELETE FROM sessions WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete every session expired at `now`. Returns the count of deleted rows.
    pub async fn delete_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
