//! Transaction integrity demo.
//!
//! Two inserts with the same email run in one transaction. The second always
//! trips the UNIQUE constraint; the transaction is rolled back so the first
//! insert leaves no trace. A parameterized read then shows the rolled-back
//! state.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{Sqlite, Transaction};
use tracing::{info, warn};

use crate::error::{DbError, IntegrityViolation, Result};
use crate::ShopDb;

/// Email reused by both demo inserts.
pub const TEMPORAL_EMAIL: &str = "temporal@example.com";

const INSERT_TEMPORAL: &str = "INSERT INTO customers (first_name, last_name, email, city, signup_date) \
     VALUES (?, ?, ?, ?, ?)";

/// Outcome of [`ShopDb::run_integrity_demo`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityDemoReport {
    pub customers_before: i64,
    pub customers_after: i64,
    pub violation: IntegrityViolation,
    pub message: String,
    pub city: String,
    pub city_count: i64,
}

impl IntegrityDemoReport {
    /// Whether the failed transaction left the customer count untouched.
    pub fn rolled_back(&self) -> bool {
        self.customers_before == self.customers_after
    }
}

impl ShopDb {
    /// Run the duplicate-email transaction, then count customers in `city`.
    ///
    /// `today` is the signup date of the attempted rows.
    pub async fn run_integrity_demo(
        &self,
        city: &str,
        today: NaiveDate,
    ) -> Result<IntegrityDemoReport> {
        let customers_before = self.customer_count().await?;

        let mut tx = self.pool.begin().await?;
        let attempt = insert_twice(&mut tx, city, today).await;

        let (violation, message) = match attempt {
            Err(DbError::Integrity {
                violation: IntegrityViolation::Uniqueness,
                message,
            }) => {
                tx.rollback().await?;
                (IntegrityViolation::Uniqueness, message)
            }
            Err(err) => return Err(err),
            Ok(()) => {
                tx.rollback().await?;
                return Err(DbError::invalid_state(format!(
                    "Duplicate email {} was accepted",
                    TEMPORAL_EMAIL
                )));
            }
        };
        info!(%violation, "Duplicate insert rejected; transaction rolled back");

        let city_count = self.count_customers_in_city(city).await?;
        let customers_after = self.customer_count().await?;
        if customers_after != customers_before {
            warn!(
                customers_before,
                customers_after, "Customer count changed across rolled-back transaction"
            );
        }

        Ok(IntegrityDemoReport {
            customers_before,
            customers_after,
            violation,
            message,
            city: city.to_string(),
            city_count,
        })
    }

    /// Number of customers in `city`, bound as a parameter.
    pub async fn count_customers_in_city(&self, city: &str) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE city = ?")
            .bind(city)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Either insert may hit the UNIQUE email constraint; the first one does when
/// the store already holds [`TEMPORAL_EMAIL`].
async fn insert_twice(
    tx: &mut Transaction<'_, Sqlite>,
    city: &str,
    today: NaiveDate,
) -> Result<()> {
    insert_temporal(tx, city, today).await?;
    insert_temporal(tx, city, today).await
}

async fn insert_temporal(
    tx: &mut Transaction<'_, Sqlite>,
    city: &str,
    today: NaiveDate,
) -> Result<()> {
    sqlx::query(INSERT_TEMPORAL)
        .bind("Temporal")
        .bind("Test")
        .bind(TEMPORAL_EMAIL)
        .bind(city)
        .bind(today)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
