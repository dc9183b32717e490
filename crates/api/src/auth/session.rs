//! Session manager: issues, validates, renews and revokes login sessions.
//!
//! Every lookup is judged against the injected [`Clock`]. Failures of any kind
//! (unknown token, expired, revoked) surface as the same
//! [`CoreError::no_active_session`] so clients cannot tell them apart.

use std::sync::Arc;

use sqlx::PgPool;
use warden_core::clock::Clock;
use warden_core::error::CoreError;
use warden_core::session::{expires_at_from, generate_token, SessionState};
use warden_core::types::DbId;
use warden_db::models::session::{CreateSession, Session};
use warden_db::repositories::SessionRepo;

use crate::error::AppResult;

#[derive(Clone)]
pub struct SessionManager {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl SessionManager {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Issue a new session for `user_id`, valid for the full TTL.
    pub async fn create(&self, user_id: DbId) -> AppResult<Session> {
        let now = self.clock.now();
        let input = CreateSession {
            user_id,
            token: generate_token(),
            expires_at: expires_at_from(now),
        };
        let session = SessionRepo::create(&self.pool, &input, now).await?;
        tracing::info!(session_id = %session.id, user_id = %user_id, "Session created");
        Ok(session)
    }

    /// Look up a session by token, only if it is still active.
    ///
    /// This does not renew; authenticated requests go through
    /// [`authenticate`](Self::authenticate).
    pub async fn find_one_valid_by_token(&self, token: &str) -> AppResult<Session> {
        SessionRepo::find_valid_by_token(&self.pool, token, self.clock.now())
            .await?
            .ok_or_else(|| CoreError::no_active_session().into())
    }

    /// Slide the session's expiry to `now + TTL` and bump `updated_at`.
    ///
    /// Concurrent renewals of the same session are harmless: last write wins.
    /// A session already past its expiry is never brought back.
    pub async fn renew(&self, session: &Session) -> AppResult<Session> {
        let now = self.clock.now();
        if SessionState::at(session.expires_at, now) == SessionState::Expired {
            return Err(CoreError::no_active_session().into());
        }
        let renewed = SessionRepo::renew(&self.pool, session.id, expires_at_from(now), now)
            .await?
            .ok_or_else(CoreError::no_active_session)?;
        tracing::debug!(session_id = %renewed.id, "Session renewed");
        Ok(renewed)
    }

    /// Validate a presented token and renew it. The read path of every
    /// authenticated request.
    pub async fn authenticate(&self, token: &str) -> AppResult<Session> {
        let session = self.find_one_valid_by_token(token).await?;
        self.renew(&session).await
    }

    /// Delete the session, returning its last persisted state.
    ///
    /// The caller must also clear the client's cookie.
    pub async fn revoke(&self, session: &Session) -> AppResult<Session> {
        let revoked = SessionRepo::delete(&self.pool, session.id)
            .await?
            .ok_or_else(CoreError::no_active_session)?;
        tracing::info!(session_id = %revoked.id, user_id = %revoked.user_id, "Session revoked");
        Ok(revoked)
    }

    /// Physically delete every session already expired. Returns the count.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        Ok(SessionRepo::delete_expired(&self.pool, self.clock.now()).await?)
    }
}
