//! Integration tests for session issuance, validation, renewal and revocation.

mod common;

use chrono::Duration;
use sqlx::PgPool;
use warden_api::error::AppError;
use warden_core::clock::Clock;
use warden_core::error::CoreError;
use warden_core::session::{expiration, EXPIRATION_IN_MILLISECONDS, TOKEN_BYTES};

fn assert_no_active_session(err: AppError) {
    assert_eq!(err.to_core(), CoreError::no_active_session());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_issues_full_ttl(pool: PgPool) {
    let (state, clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;

    let session = state.sessions.create(alice.id).await.unwrap();

    assert_eq!(session.id.get_version_num(), 4);
    assert_eq!(session.user_id, alice.id);
    assert_eq!(session.token.len(), TOKEN_BYTES * 2);
    assert_eq!(session.created_at, clock.now());
    assert_eq!(session.updated_at, clock.now());
    assert_eq!(
        session.expires_at,
        clock.now() + Duration::milliseconds(EXPIRATION_IN_MILLISECONDS)
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tokens_are_unique_per_session(pool: PgPool) {
    let (state, _clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;

    let a = state.sessions.create(alice.id).await.unwrap();
    let b = state.sessions.create(alice.id).await.unwrap();

    assert_ne!(a.token, b.token);
    assert_ne!(a.id, b.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_token_is_unauthorized(pool: PgPool) {
    let (state, _clock) = common::test_state(pool);

    let err = state
        .sessions
        .find_one_valid_by_token(
            "ed3c145d53c03a4bc8bac861e0d06fb258c0b69844d3122afd65105f3f5b2093",
        )
        .await
        .unwrap_err();

    assert_no_active_session(err);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn session_created_one_ttl_ago_is_expired(pool: PgPool) {
    let (state, clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;

    clock.rewind(expiration());
    let session = state.sessions.create(alice.id).await.unwrap();
    clock.advance(expiration());

    let err = state
        .sessions
        .find_one_valid_by_token(&session.token)
        .await
        .unwrap_err();
    assert_no_active_session(err);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expired_and_unknown_tokens_fail_identically(pool: PgPool) {
    let (state, clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;

    let session = state.sessions.create(alice.id).await.unwrap();
    clock.advance(expiration() + Duration::milliseconds(1));

    let expired = state
        .sessions
        .find_one_valid_by_token(&session.token)
        .await
        .unwrap_err()
        .to_core();
    let unknown = state
        .sessions
        .find_one_valid_by_token("does-not-exist")
        .await
        .unwrap_err()
        .to_core();

    assert_eq!(expired, unknown);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn authenticate_renews_with_sliding_window(pool: PgPool) {
    let (state, clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;

    let session = state.sessions.create(alice.id).await.unwrap();

    // Half a TTL later the session is still valid and gets pushed out again.
    clock.advance(Duration::days(15));
    let renewed = state.sessions.authenticate(&session.token).await.unwrap();

    assert!(renewed.expires_at > session.expires_at);
    assert!(renewed.updated_at > session.updated_at);
    assert_eq!(renewed.expires_at, clock.now() + expiration());
    assert_eq!(renewed.created_at, session.created_at);
    assert_eq!(renewed.token, session.token);

    // Past the original expiry, but within the renewed window.
    clock.advance(Duration::days(20));
    let again = state.sessions.authenticate(&session.token).await.unwrap();
    assert!(again.expires_at > renewed.expires_at);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn find_does_not_renew(pool: PgPool) {
    let (state, clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;

    let session = state.sessions.create(alice.id).await.unwrap();
    clock.advance(Duration::minutes(5));

    let found = state
        .sessions
        .find_one_valid_by_token(&session.token)
        .await
        .unwrap();
    assert_eq!(found, session);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_renewals_are_harmless(pool: PgPool) {
    let (state, clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;
    let session = state.sessions.create(alice.id).await.unwrap();

    clock.advance(Duration::minutes(1));
    let (a, b) = tokio::join!(
        state.sessions.authenticate(&session.token),
        state.sessions.authenticate(&session.token),
    );

    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.expires_at, clock.now() + expiration());
    assert_eq!(b.expires_at, a.expires_at);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revoke_returns_snapshot_and_invalidates_token(pool: PgPool) {
    let (state, clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;
    let session = state.sessions.create(alice.id).await.unwrap();

    clock.advance(Duration::minutes(1));
    let found = state
        .sessions
        .find_one_valid_by_token(&session.token)
        .await
        .unwrap();
    let revoked = state.sessions.revoke(&found).await.unwrap();
    assert_eq!(revoked, session);

    let err = state
        .sessions
        .find_one_valid_by_token(&session.token)
        .await
        .unwrap_err();
    assert_no_active_session(err);

    // A second revoke of the same session has nothing to delete.
    let err = state.sessions.revoke(&found).await.unwrap_err();
    assert_no_active_session(err);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn renew_after_revoke_is_unauthorized(pool: PgPool) {
    let (state, _clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;
    let session = state.sessions.create(alice.id).await.unwrap();

    state.sessions.revoke(&session).await.unwrap();

    let err = state.sessions.renew(&session).await.unwrap_err();
    assert_no_active_session(err);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn renew_does_not_resurrect_expired_session(pool: PgPool) {
    let (state, clock) = common::test_state(pool);
    let alice = common::create_user(&state, "alice", "a@x.com").await;
    let session = state.sessions.create(alice.id).await.unwrap();

    clock.advance(expiration());

    let err = state.sessions.renew(&session).await.unwrap_err();
    assert_no_active_session(err);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn purge_removes_only_expired_rows(pool: PgPool) {
    let (state, clock) = common::test_state(pool.clone());
    let alice = common::create_user(&state, "alice", "a@x.com").await;

    clock.rewind(expiration() + Duration::days(1));
    state.sessions.create(alice.id).await.unwrap();
    clock.advance(expiration() + Duration::days(1));
    let live = state.sessions.create(alice.id).await.unwrap();

    assert_eq!(state.sessions.purge_expired().await.unwrap(), 1);
    assert_eq!(state.sessions.purge_expired().await.unwrap(), 0);
    state
        .sessions
        .find_one_valid_by_token(&live.token)
        .await
        .unwrap();
}

/// Create alice, log her in, then let the session lapse.
#[sqlx::test(migrations = "../db/migrations")]
async fn end_to_end_session_expires_after_ttl(pool: PgPool) {
    let (state, clock) = common::test_state(pool);

    let alice = common::create_user(&state, "alice", "a@x.com").await;
    let session = state.sessions.create(alice.id).await.unwrap();

    let found = state
        .sessions
        .find_one_valid_by_token(&session.token)
        .await
        .unwrap();
    assert_eq!(found.user_id, alice.id);

    clock.advance(expiration() + Duration::milliseconds(1));

    let err = state
        .sessions
        .find_one_valid_by_token(&session.token)
        .await
        .unwrap_err();
    assert_no_active_session(err);
}
