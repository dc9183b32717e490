use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    warden_db::health_check(&pool).await.unwrap();

    for table in ["users", "sessions"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The case-insensitive unique indexes back the application's pre-check.
#[sqlx::test(migrations = "./migrations")]
async fn test_unique_login_indexes_exist(pool: PgPool) {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT indexname FROM pg_indexes
         WHERE tablename = 'users'
           AND indexdef LIKE 'CREATE UNIQUE INDEX%'
         ORDER BY indexname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let names: Vec<&str> = rows.iter().map(|(n,)| n.as_str()).collect();
    assert!(names.contains(&warden_core::identity::USERNAME_CONSTRAINT));
    assert!(names.contains(&warden_core::identity::EMAIL_CONSTRAINT));
}

/// Every table must carry `created_at` and `updated_at` as timestamptz.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    for table in ["users", "sessions"] {
        for col in ["created_at", "updated_at"] {
            let (data_type,): (String,) = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("Table {table} is missing column {col}: {e}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// The status report reflects the live server.
#[sqlx::test(migrations = "./migrations")]
async fn test_database_status(pool: PgPool) {
    let status = warden_db::status::database_status(&pool).await.unwrap();

    assert!(!status.version.is_empty());
    assert!(status.version.chars().next().unwrap().is_ascii_digit());
    assert!(status.max_connections > 0);
    assert!(status.opened_connections >= 1);
    assert!(status.opened_connections <= status.max_connections);
}
