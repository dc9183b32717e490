use std::sync::Arc;

use warden_core::clock::Clock;

use crate::auth::identity::IdentityService;
use crate::auth::password::PepperedHasher;
use crate::auth::session::SessionManager;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: warden_db::DbPool,
    /// Server configuration, read-only after startup.
    pub config: Arc<ServerConfig>,
    /// Identity create/update workflow and lookups.
    pub identities: IdentityService,
    /// Session issuance, validation, renewal and revocation.
    pub sessions: SessionManager,
    /// Time source shared by every component above.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire the engine components around one pool, one hasher and one clock.
    pub fn new(pool: warden_db::DbPool, config: ServerConfig, clock: Arc<dyn Clock>) -> Self {
        let hasher = Arc::new(PepperedHasher::from_config(&config.auth));
        Self {
            identities: IdentityService::new(pool.clone(), hasher, Arc::clone(&clock)),
            sessions: SessionManager::new(pool.clone(), Arc::clone(&clock)),
            clock,
            pool,
            config: Arc::new(config),
        }
    }
}
