use anyhow::Result;
use tracing::info;

mod acl;
mod api;
mod auth;
mod config;
mod db;
mod error;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("media_admin=info".parse()?)
        )
        .init();

    info!("Starting media-admin v{}", env!("CARGO_PKG_VERSION"));

    let cfg = config::load()?;
    info!("Configuration loaded");

    let db_pool = db::init(&cfg).await?;
    info!("Database initialized");

    // Seed initial admin user if none exist
    db::seed_admin(&db_pool).await?;

    api::serve(cfg, db_pool).await?;

    Ok(())
}
