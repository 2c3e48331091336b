//! Fixed analytical query catalog.
//!
//! Four named queries over the customers/orders join. Only PAID orders add
//! to revenue: the sums are conditional (`CASE WHEN status = 'PAID'`) rather
//! than filtered, so non-PAID orders still place their customer, city or
//! month in a group, contributing 0. The join is always inner, so customers
//! without orders never appear.
//!
//! Query bodies are versioned constants; change the text and bump the
//! version together.

use serde::Serialize;
use sqlx::Row;
use tracing::debug;

use crate::error::Result;
use crate::table::QueryTable;
use crate::types::{CategoryCityRevenue, CityRank, MonthlyRevenue, TopCustomer};
use crate::ShopDb;

/// Version of the query bodies below.
pub const CATALOG_VERSION: u32 = 1;

/// Maximum rows returned by `top_customers`.
pub const TOP_CUSTOMERS_LIMIT: i64 = 10;

/// Rows kept per city by `window_rank_in_city`.
pub const RANKS_PER_CITY: i64 = 3;

const TOP_CUSTOMERS_SQL: &str = r#"
SELECT c.customer_id,
       c.first_name || ' ' || c.last_name AS customer,
       c.city,
       SUM(CASE WHEN o.status = 'PAID' THEN o.amount ELSE 0.0 END) AS revenue
FROM customers c
JOIN orders o ON o.customer_id = c.customer_id
GROUP BY c.customer_id, customer, c.city
HAVING revenue > 0
ORDER BY revenue DESC, c.customer_id ASC
LIMIT 10
"#;

const MONTHLY_REVENUE_SQL: &str = r#"
SELECT strftime('%Y-%m', o.order_date) AS ym,
       SUM(CASE WHEN o.status = 'PAID' THEN o.amount ELSE 0.0 END) AS revenue
FROM orders o
GROUP BY ym
ORDER BY ym
"#;

const CATEGORY_CITY_MATRIX_SQL: &str = r#"
SELECT c.city, o.category,
       SUM(CASE WHEN o.status = 'PAID' THEN o.amount ELSE 0.0 END) AS revenue
FROM customers c
JOIN orders o ON o.customer_id = c.customer_id
GROUP BY c.city, o.category
ORDER BY c.city, o.category
"#;

// ROW_NUMBER, not RANK: tied revenues still get distinct consecutive ranks.
const WINDOW_RANK_IN_CITY_SQL: &str = r#"
SELECT city, customer, revenue, rn FROM (
  SELECT c.city AS city,
         c.first_name || ' ' || c.last_name AS customer,
         SUM(CASE WHEN o.status = 'PAID' THEN o.amount ELSE 0.0 END) AS revenue,
         ROW_NUMBER() OVER (
           PARTITION BY c.city
           ORDER BY SUM(CASE WHEN o.status = 'PAID' THEN o.amount ELSE 0.0 END) DESC,
                    c.customer_id ASC
         ) AS rn
  FROM customers c
  JOIN orders o ON o.customer_id = c.customer_id
  GROUP BY c.city, c.customer_id
) t
WHERE rn <= 3
ORDER BY city, rn
"#;

/// A query in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogQuery {
    TopCustomers,
    MonthlyRevenue,
    CategoryCityMatrix,
    WindowRankInCity,
}

impl CatalogQuery {
    /// Catalog order; reports and the demo follow it.
    pub const ALL: [CatalogQuery; 4] = [
        Self::TopCustomers,
        Self::MonthlyRevenue,
        Self::CategoryCityMatrix,
        Self::WindowRankInCity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TopCustomers => "top_customers",
            Self::MonthlyRevenue => "monthly_revenue",
            Self::CategoryCityMatrix => "category_city_matrix",
            Self::WindowRankInCity => "window_rank_in_city",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.name() == name)
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Self::TopCustomers => TOP_CUSTOMERS_SQL,
            Self::MonthlyRevenue => MONTHLY_REVENUE_SQL,
            Self::CategoryCityMatrix => CATEGORY_CITY_MATRIX_SQL,
            Self::WindowRankInCity => WINDOW_RANK_IN_CITY_SQL,
        }
    }

    /// Result column names, in select order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::TopCustomers => &["customer_id", "customer", "city", "revenue"],
            Self::MonthlyRevenue => &["ym", "revenue"],
            Self::CategoryCityMatrix => &["city", "category", "revenue"],
            Self::WindowRankInCity => &["city", "customer", "revenue", "rn"],
        }
    }
}

impl std::fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ShopDb {
    /// Run any catalog query into a generic table.
    pub async fn run_catalog_query(&self, query: CatalogQuery) -> Result<QueryTable> {
        let rows = sqlx::query(query.sql()).fetch_all(&self.pool).await?;
        debug!(query = query.name(), rows = rows.len(), "Catalog query executed");
        QueryTable::from_rows(query.columns(), &rows)
    }

    /// Top 10 customers by PAID revenue, zero-revenue customers excluded.
    pub async fn top_customers(&self) -> Result<Vec<TopCustomer>> {
        let rows = sqlx::query(TOP_CUSTOMERS_SQL)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| -> Result<TopCustomer> {
                Ok(TopCustomer {
                    customer_id: row.try_get("customer_id")?,
                    customer: row.try_get("customer")?,
                    city: row.try_get("city")?,
                    revenue: row.try_get("revenue")?,
                })
            })
            .collect()
    }

    /// PAID revenue per `YYYY-MM`, oldest first.
    pub async fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>> {
        let rows = sqlx::query(MONTHLY_REVENUE_SQL)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| -> Result<MonthlyRevenue> {
                Ok(MonthlyRevenue {
                    ym: row.try_get("ym")?,
                    revenue: row.try_get("revenue")?,
                })
            })
            .collect()
    }

    /// PAID revenue per (city, category).
    pub async fn category_city_matrix(&self) -> Result<Vec<CategoryCityRevenue>> {
        let rows = sqlx::query(CATEGORY_CITY_MATRIX_SQL)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| -> Result<CategoryCityRevenue> {
                Ok(CategoryCityRevenue {
                    city: row.try_get("city")?,
                    category: row.try_get("category")?,
                    revenue: row.try_get("revenue")?,
                })
            })
            .collect()
    }

    /// Top 3 customers per city by PAID revenue.
    pub async fn window_rank_in_city(&self) -> Result<Vec<CityRank>> {
        let rows = sqlx::query(WINDOW_RANK_IN_CITY_SQL)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| -> Result<CityRank> {
                Ok(CityRank {
                    city: row.try_get("city")?,
                    customer: row.try_get("customer")?,
                    revenue: row.try_get("revenue")?,
                    rn: row.try_get("rn")?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for query in CatalogQuery::ALL {
            assert_eq!(CatalogQuery::parse(query.name()), Some(query));
        }
        assert_eq!(CatalogQuery::parse("ad_hoc"), None);
    }

    #[test]
    fn test_limits_match_sql() {
        assert!(TOP_CUSTOMERS_SQL.contains(&format!("LIMIT {}", TOP_CUSTOMERS_LIMIT)));
        assert!(WINDOW_RANK_IN_CITY_SQL.contains(&format!("rn <= {}", RANKS_PER_CITY)));
    }

    #[test]
    fn test_every_query_only_sums_paid() {
        for query in CatalogQuery::ALL {
            assert!(
                query.sql().contains("CASE WHEN o.status = 'PAID'"),
                "{} must use a conditional PAID sum",
                query
            );
        }
    }
}
