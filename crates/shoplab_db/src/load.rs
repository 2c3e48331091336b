//! Write path: atomic bulk inserts and guarded seeding.

use sqlx::{QueryBuilder, Sqlite};
use tracing::{info, warn};

use crate::error::Result;
use crate::types::{NewCustomer, NewOrder, SeedBatch, SeedOutcome};
use crate::ShopDb;

/// Bound-parameter ceiling per statement (SQLite's historical default).
const MAX_PARAMS: usize = 999;

const CUSTOMER_COLUMNS: usize = 5;
const ORDER_COLUMNS: usize = 5;

impl ShopDb {
    /// Insert all customers in one transaction.
    ///
    /// Either every row commits or none does; a duplicate email fails the
    /// whole batch.
    pub async fn load_customers(&self, rows: &[NewCustomer]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut total = 0;
        for chunk in rows.chunks(MAX_PARAMS / CUSTOMER_COLUMNS) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO customers (first_name, last_name, email, city, signup_date) ",
            );
            builder.push_values(chunk, |mut row, customer| {
                row.push_bind(customer.first_name.clone())
                    .push_bind(customer.last_name.clone())
                    .push_bind(customer.email.clone())
                    .push_bind(customer.city.clone())
                    .push_bind(customer.signup_date);
            });
            total += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        info!(rows = total, "Customers loaded");
        Ok(total)
    }

    /// Insert all orders in one transaction.
    ///
    /// Every `customer_id` must already exist; an orphan or an out-of-domain
    /// status fails the whole batch.
    pub async fn load_orders(&self, rows: &[NewOrder]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut total = 0;
        for chunk in rows.chunks(MAX_PARAMS / ORDER_COLUMNS) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO orders (customer_id, order_date, category, amount, status) ",
            );
            builder.push_values(chunk, |mut row, order| {
                row.push_bind(order.customer_id)
                    .push_bind(order.order_date)
                    .push_bind(order.category.clone())
                    .push_bind(order.amount)
                    .push_bind(order.status.as_str());
            });
            total += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        info!(rows = total, "Orders loaded");
        Ok(total)
    }

    /// Seed the store unless it already holds customers.
    ///
    /// `generate` only runs when seeding goes ahead. Customers commit before
    /// orders are written, so orders can reference them.
    pub async fn seed<F>(&self, generate: F) -> Result<SeedOutcome>
    where
        F: FnOnce() -> SeedBatch,
    {
        let existing = self.customer_count().await?;
        if existing > 0 {
            warn!(existing, "Store already has customers; skipping seed");
            return Ok(SeedOutcome::AlreadySeeded {
                existing_customers: existing,
            });
        }

        let batch = generate();
        let customers = self.load_customers(&batch.customers).await?;
        let orders = self.load_orders(&batch.orders).await?;

        Ok(SeedOutcome::Seeded { customers, orders })
    }

    /// Number of customer rows.
    pub async fn customer_count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of order rows.
    pub async fn order_count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
