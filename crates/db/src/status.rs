//! Database facts reported by the status endpoint.

use serde::Serialize;

use crate::DbPool;

/// Server version and connection usage of the connected database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseStatus {
    pub version: String,
    pub max_connections: i32,
    /// Backends currently attached to this database, including our own.
    pub opened_connections: i32,
}

/// Read [`DatabaseStatus`] from the server.
pub async fn database_status(pool: &DbPool) -> Result<DatabaseStatus, sqlx::Error> {
    let version: String = sqlx::query_scalar("SHOW server_version")
        .fetch_one(pool)
        .await?;

    let max_connections: i32 =
        sqlx::query_scalar("SELECT current_setting('max_connections')::int")
            .fetch_one(pool)
            .await?;

    let opened_connections: i32 = sqlx::query_scalar(
        "SELECT count(*)::int FROM pg_stat_activity WHERE datname = current_database()",
    )
    .fetch_one(pool)
    .await?;

    Ok(DatabaseStatus {
        version,
        max_connections,
        opened_connections,
    })
}
