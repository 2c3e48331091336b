//! Schema creation for the customers/orders store.
//!
//! All CREATE statements live here - single source of truth.

use crate::error::Result;
use crate::ShopDb;
use tracing::{debug, info};

const CREATE_CUSTOMERS: &str = r#"CREATE TABLE IF NOT EXISTS customers (
    customer_id INTEGER PRIMARY KEY,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    email       TEXT UNIQUE NOT NULL,
    city        TEXT,
    signup_date TEXT NOT NULL
)"#;

const CREATE_ORDERS: &str = r#"CREATE TABLE IF NOT EXISTS orders (
    order_id    INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL,
    order_date  TEXT NOT NULL,
    category    TEXT NOT NULL,
    amount      REAL NOT NULL,
    status      TEXT NOT NULL CHECK(status IN ('PAID','CANCELLED','REFUNDED')),
    FOREIGN KEY (customer_id) REFERENCES customers(customer_id)
)"#;

/// Secondary indexes backing the catalog's join and filter columns.
const INDEXES: [(&str, &str); 3] = [
    (
        "idx_orders_customer",
        "CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id)",
    ),
    (
        "idx_orders_date",
        "CREATE INDEX IF NOT EXISTS idx_orders_date ON orders(order_date)",
    ),
    (
        "idx_orders_status",
        "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status)",
    ),
];

/// Names of the indexes created by [`ShopDb::ensure_indexes`].
pub const INDEX_NAMES: [&str; 3] = [INDEXES[0].0, INDEXES[1].0, INDEXES[2].0];

impl ShopDb {
    /// Ensure both tables exist with their constraints.
    ///
    /// Safe to call on an initialized store.
    pub async fn ensure_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(CREATE_CUSTOMERS).execute(&mut *tx).await?;
        sqlx::query(CREATE_ORDERS).execute(&mut *tx).await?;
        tx.commit().await?;

        info!("Store schema verified");
        Ok(())
    }

    /// Ensure the secondary indexes on `orders` exist.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for (name, ddl) in INDEXES {
            sqlx::query(ddl).execute(&mut *tx).await?;
            debug!(index = name, "Index ensured");
        }
        tx.commit().await?;

        info!(count = INDEXES.len(), "Store indexes verified");
        Ok(())
    }

    /// Whether both tables exist.
    pub async fn is_initialized(&self) -> Result<bool> {
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('customers', 'orders')",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(tables == 2)
    }
}
