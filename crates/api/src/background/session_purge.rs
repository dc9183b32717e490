//! Periodic physical deletion of expired sessions.
//!
//! Expired rows are already invisible to lookups; this only reclaims space.
//! Runs on a fixed interval using `tokio::time::interval`.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::session::SessionManager;

/// Run the purge loop until `cancel` is triggered.
pub async fn run(sessions: SessionManager, every: Duration, cancel: CancellationToken) {
    // `interval` panics on a zero period.
    let every = every.max(Duration::from_secs(1));
    tracing::info!(interval_secs = every.as_secs(), "Session purge job started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session purge job stopping");
                break;
            }
            _ = interval.tick() => {
                match sessions.purge_expired().await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session purge: removed expired sessions");
                    }
                    Ok(_) => {
                        tracing::debug!("Session purge: nothing to remove");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session purge: cleanup failed");
                    }
                }
            }
        }
    }
}
