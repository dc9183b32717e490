//! Identity mutation workflow and read accessors.
//!
//! Create and update always run the uniqueness pre-check before writing and
//! always hash a new password before it is persisted. The pre-check is a
//! check-then-write: two concurrent writers can both pass it, in which case
//! the case-insensitive unique indexes reject the loser and the violation is
//! reported as the same `ValidationError`.

use std::sync::Arc;

use sqlx::PgPool;
use warden_core::clock::Clock;
use warden_core::error::CoreError;
use warden_core::identity::{find_collision, ExistingIdentifiers, UniqueCandidate, UserLookup};
use warden_core::types::DbId;
use warden_db::models::user::{CreateUser, UpdateUser, User};
use warden_db::repositories::UserRepo;

use crate::auth::password::{hash_blocking, verify_blocking, PepperedHasher};
use crate::error::{AppError, AppResult};

/// Input for [`IdentityService::create`].
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial changes for [`IdentityService::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct IdentityChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct IdentityService {
    pool: PgPool,
    hasher: Arc<PepperedHasher>,
    clock: Arc<dyn Clock>,
}

impl IdentityService {
    pub fn new(pool: PgPool, hasher: Arc<PepperedHasher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            hasher,
            clock,
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub async fn find_one_by_id(&self, id: DbId) -> AppResult<User> {
        UserRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| UserLookup::Id.not_found().into())
    }

    pub async fn find_one_by_username(&self, username: &str) -> AppResult<User> {
        UserRepo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| UserLookup::Username.not_found().into())
    }

    pub async fn find_one_by_email(&self, email: &str) -> AppResult<User> {
        UserRepo::find_by_email(&self.pool, email)
            .await?
            .ok_or_else(|| UserLookup::Email.not_found().into())
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Register a new identity.
    ///
    /// 1. Uniqueness pre-check over username and email.
    /// 2. Hash the password.
    /// 3. Insert and return the persisted row.
    pub async fn create(&self, input: NewIdentity) -> AppResult<User> {
        self.validate_unique_fields(
            UniqueCandidate {
                username: Some(&input.username),
                email: Some(&input.email),
            },
            None,
        )
        .await?;

        let password_hash = hash_blocking(Arc::clone(&self.hasher), input.password).await?;

        let row = CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
        };
        let user = UserRepo::create(&self.pool, &row, self.clock.now())
            .await
            .map_err(AppError::from_unique_violation)?;

        tracing::info!(user_id = %user.id, username = %user.username, "Identity created");
        Ok(user)
    }

    /// Apply partial changes to the identity currently named `current_username`.
    ///
    /// Username and email are each checked against every identity except this
    /// one, so re-submitting one's own value is accepted.
    pub async fn update(&self, current_username: &str, changes: IdentityChanges) -> AppResult<User> {
        let current = self.find_one_by_username(current_username).await?;

        if let Some(username) = changes.username.as_deref() {
            self.validate_unique_fields(UniqueCandidate::username(username), Some(current.id))
                .await?;
        }

        if let Some(email) = changes.email.as_deref() {
            self.validate_unique_fields(UniqueCandidate::email(email), Some(current.id))
                .await?;
        }

        let password_hash = match changes.password {
            Some(password) => hash_blocking(Arc::clone(&self.hasher), password).await?,
            None => current.password_hash,
        };

        let merged = UpdateUser {
            username: changes.username.unwrap_or(current.username),
            email: changes.email.unwrap_or(current.email),
            password_hash,
        };

        let user = UserRepo::update(&self.pool, current.id, &merged, self.clock.now())
            .await
            .map_err(AppError::from_unique_violation)?
            .ok_or_else(|| UserLookup::Username.not_found())?;

        tracing::info!(user_id = %user.id, "Identity updated");
        Ok(user)
    }

    // -----------------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------------

    /// Resolve the identity owning `email` and check `password` against it.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = match self.find_one_by_email(email).await {
            Ok(user) => user,
            Err(AppError::Core(CoreError::NotFound { .. })) => {
                return Err(CoreError::invalid_credentials().into());
            }
            Err(e) => return Err(e),
        };

        let matches = verify_blocking(
            Arc::clone(&self.hasher),
            password.to_string(),
            user.password_hash.clone(),
        )
        .await?;

        if !matches {
            tracing::info!(user_id = %user.id, "Login rejected");
            return Err(CoreError::invalid_credentials().into());
        }

        Ok(user)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Uniqueness pre-check. Fails with a `ValidationError` naming the
    /// collided field, username first.
    async fn validate_unique_fields(
        &self,
        candidate: UniqueCandidate<'_>,
        exclude_id: Option<DbId>,
    ) -> AppResult<()> {
        if candidate.is_empty() {
            return Ok(());
        }

        let rows: Vec<ExistingIdentifiers> =
            UserRepo::find_identifier_conflicts(&self.pool, &candidate, exclude_id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();

        match find_collision(&candidate, &rows) {
            Some(field) => Err(field.taken().into()),
            None => Ok(()),
        }
    }
}
