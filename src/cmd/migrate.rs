use sqlx::migrate::Migrator;

use crate::{conf::Settings, pkg::server::state::db_pool, prelude::Result};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn apply(settings: &Settings) -> Result<()> {
    let pool = db_pool(settings).await?;
    tracing::debug!("connected to db");
    MIGRATOR.run(&pool).await?;
    pool.close().await;

    println!("Migrations applied successfully");
    Ok(())
}
