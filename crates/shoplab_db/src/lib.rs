//! Store layer for shoplab
//!
//! This crate owns every statement that touches the customers/orders store:
//! schema creation, the atomic write path, the fixed analytical query catalog,
//! plan inspection and the transaction integrity demo.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shoplab_db::{CatalogQuery, ShopDb, Result};
//!
//! let db = ShopDb::open("data/shop.db").await?;
//! db.ensure_schema().await?;
//! db.ensure_indexes().await?;
//!
//! let top = db.top_customers().await?;
//! let plan = db.explain_plan(CatalogQuery::TopCustomers.sql()).await?;
//! ```

mod error;
mod read_only;
mod schema;
mod table;
mod types;

// Method implementations organized by component
pub mod catalog;
mod integrity;
mod load;
pub mod plan;

pub use catalog::CatalogQuery;
pub use error::{DbError, IntegrityViolation, Result};
pub use integrity::{IntegrityDemoReport, TEMPORAL_EMAIL};
pub use plan::{PlanReport, QueryPlan};
pub use schema::INDEX_NAMES;
pub use table::{DbValue, QueryTable};
pub use types::*;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use tracing::info;

/// Handle to the embedded customers/orders store.
///
/// Holds a single-connection pool: every statement runs on the same
/// connection, one after another.
#[derive(Clone)]
pub struct ShopDb {
    pool: SqlitePool,
}

impl ShopDb {
    /// Open or create a store at the given path.
    ///
    /// Does not create tables; call [`ShopDb::ensure_schema`] for that.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // SQLite ships with foreign key enforcement off; it is per connection.
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        info!(path = %path.display(), "Store opened");

        Ok(Self { pool })
    }

    /// Get the underlying connection pool (escape hatch for ad-hoc statements).
    ///
    /// Prefer using the typed methods instead.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the store.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_database_and_parent_dir() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("nested").join("shop.db");

        let db = ShopDb::open(&db_path).await.unwrap();
        assert!(db_path.exists());

        db.close().await;
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let tmp = TempDir::new().unwrap();
        let db = ShopDb::open(tmp.path().join("shop.db")).await.unwrap();

        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
