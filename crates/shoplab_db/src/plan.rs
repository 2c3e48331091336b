//! Query plan inspection via `EXPLAIN QUERY PLAN`.

use serde::Serialize;
use sqlx::Row;
use tracing::debug;

use crate::catalog::CatalogQuery;
use crate::error::Result;
use crate::read_only::ensure_read_only;
use crate::ShopDb;

/// The plan of one catalog query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
    pub query: CatalogQuery,
    pub detail: String,
}

/// Plans for the whole catalog, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanReport {
    pub plans: Vec<QueryPlan>,
}

impl PlanReport {
    /// Text form: a `-- name --` header per query followed by its plan lines.
    pub fn render(&self) -> String {
        self.plans
            .iter()
            .map(|plan| format!("-- {} --\n{}\n", plan.query.name(), plan.detail))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ShopDb {
    /// Plan description for `sql`, one line per plan step.
    ///
    /// Only the human-readable detail column is kept; the node ids are
    /// dropped. `sql` must be a single SELECT/WITH statement.
    pub async fn explain_plan(&self, sql: &str) -> Result<String> {
        ensure_read_only(sql)?;

        let statement = format!("EXPLAIN QUERY PLAN {}", sql.trim().trim_end_matches(';'));
        let rows = sqlx::query(&statement).fetch_all(&self.pool).await?;

        let lines = rows
            .iter()
            .map(|row| row.try_get::<String, _>("detail"))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(steps = lines.len(), "Query plan inspected");
        Ok(lines.join("\n"))
    }

    /// Plans for every catalog query.
    pub async fn plan_report(&self) -> Result<PlanReport> {
        let mut plans = Vec::with_capacity(CatalogQuery::ALL.len());
        for query in CatalogQuery::ALL {
            let detail = self.explain_plan(query.sql()).await?;
            plans.push(QueryPlan { query, detail });
        }
        Ok(PlanReport { plans })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbError;
    use tempfile::TempDir;

    async fn indexed_db(tmp: &TempDir) -> ShopDb {
        let db = ShopDb::open(tmp.path().join("shop.db")).await.unwrap();
        db.ensure_schema().await.unwrap();
        db.ensure_indexes().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_status_filter_uses_index() {
        let tmp = TempDir::new().unwrap();
        let db = indexed_db(&tmp).await;

        let plan = db
            .explain_plan("SELECT * FROM orders WHERE status = 'PAID'")
            .await
            .unwrap();

        assert!(plan.contains("idx_orders_status"), "{plan}");
        // detail text only, no numeric node columns
        assert!(plan.lines().all(|line| !line.trim().is_empty()));
    }

    #[tokio::test]
    async fn test_explain_rejects_writes() {
        let tmp = TempDir::new().unwrap();
        let db = indexed_db(&tmp).await;

        let err = db.explain_plan("DELETE FROM orders").await.unwrap_err();
        assert!(matches!(err, DbError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_plan_report_covers_catalog() {
        let tmp = TempDir::new().unwrap();
        let db = indexed_db(&tmp).await;

        let report = db.plan_report().await.unwrap();
        assert_eq!(report.plans.len(), CatalogQuery::ALL.len());

        let text = report.render();
        for query in CatalogQuery::ALL {
            assert!(text.contains(&format!("-- {} --", query.name())));
        }
        assert!(text.starts_with("-- top_customers --\n"));
    }

    #[test]
    fn test_render_layout() {
        let report = PlanReport {
            plans: vec![
                QueryPlan {
                    query: CatalogQuery::TopCustomers,
                    detail: "SCAN c".to_string(),
                },
                QueryPlan {
                    query: CatalogQuery::MonthlyRevenue,
                    detail: "SCAN o\nUSE TEMP B-TREE FOR GROUP BY".to_string(),
                },
            ],
        };

        assert_eq!(
            report.render(),
            "-- top_customers --\nSCAN c\n\n-- monthly_revenue --\nSCAN o\nUSE TEMP B-TREE FOR GROUP BY\n"
        );
    }
}
