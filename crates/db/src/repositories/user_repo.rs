//! Repository for the `users` table.
//!
//! Lookups by username and email compare `LOWER()` on both sides, matching
//! the case-insensitive unique indexes.

use sqlx::PgPool;
use warden_core::identity::UniqueCandidate;
use warden_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, UpdateUser, User, UserIdentifiers};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// Provides persistence operations for identities.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new identity stamped with `now`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUser,
        now: Timestamp,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find an identity by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 LIMIT 1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an identity by username (case-insensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE LOWER(username) = LOWER($1) LIMIT 1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find an identity by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1) LIMIT 1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Uniqueness pre-check: every row whose username or email matches a
    /// supplied candidate field, optionally excluding one identity.
    ///
    /// Absent or empty candidate fields are not matched.
    pub async fn find_identifier_conflicts(
        pool: &PgPool,
        candidate: &UniqueCandidate<'_>,
        exclude_id: Option<DbId>,
    ) -> Result<Vec<UserIdentifiers>, sqlx::Error> {
        let username = candidate.username.filter(|u| !u.is_empty());
        let email = candidate.email.filter(|e| !e.is_empty());

        sqlx::query_as::<_, UserIdentifiers>(
            "SELECT username, email FROM users
             WHERE (
                    ($1::text IS NOT NULL AND LOWER(username) = LOWER($1))
                 OR ($2::text IS NOT NULL AND LOWER(email) = LOWER($2))
             )
               AND ($3::uuid IS NULL OR id <> $3)",
        )
        .bind(username)
        .bind(email)
        .bind(exclude_id)
        .fetch_all(pool)
        .await
    }

    /// Persist every mutable column of an identity.
    ///
    /// `updated_at` becomes `now`, but never moves backwards. Returns `None`
    /// if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
        now: Timestamp,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = $2,
                email = $3,
                password_hash = $4,
                updated_at = GREATEST($5, updated_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(now)
            .fetch_optional(pool)
            .await
    }
}
