//! `--demo`: run the query catalog, write plans and chart, show rollback.

use anyhow::Context;
use serde::Serialize;
use shoplab::report::{self, DemoArtifacts};
use shoplab_db::catalog::CATALOG_VERSION;
use shoplab_db::{CatalogQuery, IntegrityDemoReport, QueryTable, ShopDb};
use std::path::Path;
use tracing::info;

use crate::cli::config;
use crate::cli::error::HelpfulError;
use crate::cli::output::{query_preview, PREVIEW_ROWS};

/// City used for the parameterized count after the rollback.
const DEMO_CITY: &str = "Santiago";

#[derive(Debug, Serialize)]
pub struct QuerySummary {
    pub name: &'static str,
    pub total_rows: usize,
    pub head: QueryTable,
}

#[derive(Debug, Serialize)]
pub struct DemoSummary {
    pub catalog_version: u32,
    pub queries: Vec<QuerySummary>,
    pub artifacts: DemoArtifacts,
    pub integrity: IntegrityDemoReport,
}

pub async fn run(db: &ShopDb, db_path: &Path, json: bool) -> anyhow::Result<DemoSummary> {
    db.ensure_indexes().await?;

    let mut queries = Vec::with_capacity(CatalogQuery::ALL.len());
    for query in CatalogQuery::ALL {
        let result = db
            .run_catalog_query(query)
            .await
            .with_context(|| format!("Query {} failed", query))?;
        if !json {
            println!("\n[Query] {}", query);
            println!("{}", query_preview(&result));
        }
        queries.push(QuerySummary {
            name: query.name(),
            total_rows: result.len(),
            head: result.head(PREVIEW_ROWS),
        });
    }

    let plans = db.plan_report().await?;
    let monthly = db.monthly_revenue().await?;
    let out_dir = config::output_dir(db_path);
    let artifacts = report::write_artifacts(&out_dir, &plans, &monthly)
        .map_err(|e| HelpfulError::artifacts_not_written(&out_dir, e))?;
    info!(
        plans = %artifacts.plans.display(),
        chart = %artifacts.chart.display(),
        "Demo artifacts written"
    );
    if !json {
        println!("\n[OK] Plans -> {}", artifacts.plans.display());
        println!("[OK] Chart -> {}", artifacts.chart.display());
    }

    let today = chrono::Local::now().date_naive();
    let integrity = db.run_integrity_demo(DEMO_CITY, today).await?;
    if !json {
        print_integrity(&integrity);
    }

    Ok(DemoSummary {
        catalog_version: CATALOG_VERSION,
        queries,
        artifacts,
        integrity,
    })
}

fn print_integrity(report: &IntegrityDemoReport) {
    println!("\n[Transactions] Duplicate email inside one transaction");
    println!("  -> {} violation caught; transaction rolled back", report.violation);
    println!("     {}", report.message);
    println!(
        "  -> Customers before/after: {}/{}",
        report.customers_before, report.customers_after
    );
    println!("  -> Customers in {}: {}", report.city, report.city_count);
}
