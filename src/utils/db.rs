// ptg-service/src/utils/db.rs
use crate::config::Config;
use crate::utils::queries;
use log::{error, info};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

// Build the connection pool; acquiring a connection fails fast after the configured timeout
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    info!(
        "🔌 Connecting to database (pool size: {}, acquire timeout: {:?})",
        config.db_pool_size, config.db_acquire_timeout
    );

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_pool_size)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            error!("❌ Failed to connect to database: {:?}", e);
            e
        })?;

    init_schema(&pool).await?;

    Ok(pool)
}

// Create the tables the service reads and writes, if missing
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(queries::CREATE_TEAMS_TABLE).execute(pool).await?;
    sqlx::query(queries::CREATE_VIEWED_TEAMS_TABLE).execute(pool).await?;
    Ok(())
}

// Single-connection in-memory pool, kept alive for the lifetime of the pool
#[cfg(test)]
pub async fn in_memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    init_schema(&pool).await.expect("schema");
    pool
}

#[cfg(test)]
pub async fn seed_teams(pool: &SqlitePool, team_ids: &[&str]) {
    for team_id in team_ids {
        sqlx::query("INSERT INTO teams (team_id, name, nickname) VALUES (?, ?, ?)")
            .bind(team_id)
            .bind(format!("Team {}", team_id))
            .bind(team_id)
            .execute(pool)
            .await
            .expect("seed team");
    }
}

// Makes every upsert that hits an existing row fail
#[cfg(test)]
pub async fn block_viewed_teams_updates(pool: &SqlitePool) {
    sqlx::query(
        "CREATE TRIGGER reject_viewed_teams_update BEFORE UPDATE ON user_viewed_teams
         BEGIN SELECT RAISE(ABORT, 'viewed teams are read only'); END",
    )
    .execute(pool)
    .await
    .expect("trigger");
}
