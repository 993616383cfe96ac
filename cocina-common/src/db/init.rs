//! Database initialization
//!
//! Creates the SQLite database on first run and applies the schema
//! idempotently on every start. Steps live in a child table keyed by
//! `(recipe_id, guid)`; deleting a recipe cascades to its steps.

use crate::db::models::DEFAULT_IMAGE;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// In-memory database with the full schema
///
/// Limited to one connection: every new connection to `:memory:` would
/// otherwise see its own empty database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_recipes_table(pool).await?;
    create_recipe_steps_table(pool).await?;
    Ok(())
}

async fn create_recipes_table(pool: &SqlitePool) -> Result<()> {
    // name_key holds the case-folded name; UNIQUE closes the
    // check-then-insert race on recipe names.
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            name_key TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            ingredients TEXT NOT NULL,
            category TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            preparation_time INTEGER NOT NULL CHECK (preparation_time > 0),
            image TEXT NOT NULL DEFAULT '{}',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        DEFAULT_IMAGE
    );
    sqlx::query(&sql).execute(pool).await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_category ON recipes(category)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_recipe_steps_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipe_steps (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            guid TEXT NOT NULL UNIQUE,
            recipe_id TEXT NOT NULL REFERENCES recipes(guid) ON DELETE CASCADE,
            step_order INTEGER NOT NULL CHECK (step_order > 0),
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_recipe_steps_recipe ON recipe_steps(recipe_id, seq)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
