//! Connection pool and schema bootstrap.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open a SQLite pool for `database_url`, e.g. `sqlite://trivia.db?mode=rwc`.
///
/// Foreign keys are enforced on every connection (sqlx's SQLite default).
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .with_context(|| format!("failed to open database at {}", database_url))?;
    Ok(pool)
}

/// Create the `categories` and `questions` tables if they do not exist yet.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            type TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create categories table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            category INTEGER NOT NULL REFERENCES categories(id),
            difficulty INTEGER NOT NULL CHECK (difficulty BETWEEN 1 AND 5)
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create questions table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS questions_category_idx ON questions (category)")
        .execute(pool)
        .await
        .context("failed to create questions category index")?;

    info!("database migrations complete");
    Ok(())
}

/// Single-connection in-memory database with the schema applied.
///
/// Every SQLite `:memory:` connection is its own database, so the pool must
/// never open a second one or drop the first.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    run_migrations(&pool).await.expect("migrations");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.unwrap();

        let (tables,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('categories', 'questions')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 2);
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let pool = memory_pool().await;

        let result = sqlx::query(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES ('q', 'a', 42, 1)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }
}
