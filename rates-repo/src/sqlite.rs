//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use rates_types::{CurrencyCode, ParsedRate, RateObservation, RateRepository, RepoError};

use crate::types::{DbRate, DbRateObservation, format_date};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic table creation.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = is_in_memory(database_url);

        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every in-memory connection is its own database, so keep exactly one alive.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;

        tracing::debug!(database_url, "SQLite repository ready");
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the table and indexes if they do not exist yet.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_exchange_rates.sql");
        sqlx::raw_sql(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateRepository for SqliteRepo {
    async fn upsert_if_absent(&self, rate: &ParsedRate) -> Result<bool, RepoError> {
        let code = rate.currency_code.as_str();
        let date = format_date(rate.date);

        // A single statement takes the write lock up front; the unique index
        // turns a same-day duplicate into a no-op.
        let result = sqlx::query(
            r#"INSERT INTO exchange_rates (currency_code, rate, date) VALUES (?, ?, ?)
               ON CONFLICT (currency_code, date) DO NOTHING"#,
        )
        .bind(code)
        .bind(rate.rate)
        .bind(&date)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            tracing::trace!(code, date = %date, "Rate already stored");
        }

        Ok(result.rows_affected() == 1)
    }

    async fn list_all(&self) -> Result<Vec<RateObservation>, RepoError> {
        let rows: Vec<DbRateObservation> = sqlx::query_as(
            r#"SELECT id, currency_code, rate, date FROM exchange_rates ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbRateObservation::into_domain).collect()
    }

    async fn latest_rate(&self, code: &CurrencyCode) -> Result<Option<f64>, RepoError> {
        let row: Option<DbRate> = sqlx::query_as(
            r#"SELECT rate FROM exchange_rates WHERE currency_code = ?
               ORDER BY date DESC, id DESC LIMIT 1"#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(|r| r.rate))
    }
}
