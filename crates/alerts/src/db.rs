//! SQLite database for users and opportunity history.

use spreadscan_core::ArbitrageOpportunity;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// A registered chat user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    /// Premium subscription expiry, SQLite datetime text (UTC). `None`
    /// means the user never had premium.
    pub premium_until: Option<String>,
}

/// Database connection for users and history.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite database at the given path.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<(), DbError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                username TEXT NOT NULL DEFAULT '',
                premium_until DATETIME,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS opportunity_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                symbol TEXT NOT NULL,
                buy_exchange TEXT NOT NULL,
                sell_exchange TEXT NOT NULL,
                buy_price REAL NOT NULL,
                sell_price REAL NOT NULL,
                profit_percent REAL NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_history_symbol
            ON opportunity_history(symbol, created_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Register a user or refresh their username. Premium state is kept.
    pub async fn upsert_user(&self, user_id: i64, username: &str) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username) VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET username = excluded.username
            "#,
        )
        .bind(user_id)
        .bind(username)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, DbError> {
        let row = sqlx::query_as::<_, (i64, String, Option<String>)>(
            "SELECT user_id, username, premium_until FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(user_id, username, premium_until)| User {
            user_id,
            username,
            premium_until,
        }))
    }

    /// The tiered access gate: is this user's subscription still running?
    ///
    /// Compares the persisted expiry against current time inside SQLite;
    /// an unknown user or an elapsed expiry is simply `false`.
    pub async fn is_premium(&self, user_id: i64) -> Result<bool, DbError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM users
            WHERE user_id = ? AND premium_until IS NOT NULL AND premium_until > datetime('now')
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Grant or extend premium until the given UTC timestamp.
    pub async fn grant_premium(
        &self,
        user_id: i64,
        until: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), DbError> {
        let until = until.format("%Y-%m-%d %H:%M:%S").to_string();
        sqlx::query(
            r#"
            INSERT INTO users (user_id, premium_until) VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET premium_until = excluded.premium_until
            "#,
        )
        .bind(user_id)
        .bind(until)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record a surfaced opportunity.
    pub async fn record_opportunity(&self, opp: &ArbitrageOpportunity) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO opportunity_history
                (symbol, buy_exchange, sell_exchange, buy_price, sell_price, profit_percent)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(opp.symbol.as_str())
        .bind(opp.buy_exchange.as_str())
        .bind(opp.sell_exchange.as_str())
        .bind(opp.buy_price)
        .bind(opp.sell_price)
        .bind(opp.profit_percent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Clean up old history entries (older than days).
    pub async fn cleanup_old_history(&self, days: i64) -> Result<u64, DbError> {
        let result = sqlx::query(
            "DELETE FROM opportunity_history WHERE created_at < datetime('now', ? || ' days')",
        )
        .bind(-days)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
