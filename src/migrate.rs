//! Database migration utilities

use sqlx_migrator::{Migrate, Plan};

use crate::Config;

/// Create the database when missing and apply every pending migration.
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Migrating {}", config.database.url);

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    homeplan_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);
    pool.close().await;

    tracing::info!("Database migrated");

    Ok(())
}
