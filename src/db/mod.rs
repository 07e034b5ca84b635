use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::config::Config;

pub mod models;

pub type DbPool = SqlitePool;

pub async fn init(cfg: &Config) -> Result<DbPool> {
    let db_url = format!("sqlite://{}?mode=rwc", cfg.database.path);

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            sqlx::sqlite::SqliteConnectOptions::from_str(&db_url)?
                .create_if_missing(true)
        )
        .await?;

    sqlx::migrate!("./src/db/migrations").run(&pool).await?;

    // SQLite PRAGMA tuning for a shared admin database
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA synchronous=NORMAL")
        .execute(&pool)
        .await?;

    tracing::info!("Database connected: {}", cfg.database.path);
    Ok(pool)
}

/// Create default admin user if no users exist yet.
pub async fn seed_admin(pool: &DbPool) -> Result<()> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if count.0 == 0 {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (username, rss_token, created_at, updated_at)
             VALUES ('admin', NULL, ?, ?)"
        )
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        tracing::info!("Created default admin user");
    }

    Ok(())
}
