//! CLI module for shoplab
//!
//! Actions run in a fixed order against one store handle:
//! init -> seed -> demo.

pub mod config;
pub mod demo;
pub mod error;
pub mod init;
pub mod output;
pub mod seed;

use serde::Serialize;
use shoplab_db::{SeedOutcome, ShopDb};
use std::path::{Path, PathBuf};

use crate::cli::error::HelpfulError;

/// Resolved actions for one invocation
#[derive(Debug)]
pub struct RunArgs {
    pub db_path: PathBuf,
    pub init_db: bool,
    pub seed: Option<seed::SeedArgs>,
    pub demo: bool,
    pub json: bool,
}

impl RunArgs {
    pub fn has_action(&self) -> bool {
        self.init_db || self.seed.is_some() || self.demo
    }
}

/// Everything an invocation did, printed once in `--json` mode.
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    init: Option<init::InitSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<SeedOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    demo: Option<demo::DemoSummary>,
}

/// Execute the requested actions
pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async { run_async(args).await })
}

async fn run_async(args: RunArgs) -> anyhow::Result<()> {
    let db = ShopDb::open(&args.db_path)
        .await
        .map_err(|e| HelpfulError::store_unavailable(&args.db_path, e))?;

    let result = run_actions(&db, &args).await;
    db.close().await;
    let summary = result?;

    if args.json {
        output::print_json(&summary)?;
    }
    Ok(())
}

async fn run_actions(db: &ShopDb, args: &RunArgs) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();

    if args.init_db {
        summary.init = Some(init::run(db, &args.db_path, args.json).await?);
    }

    if let Some(seed_args) = args.seed {
        require_schema(db, &args.db_path).await?;
        summary.seed = Some(seed::run(db, seed_args, args.json).await?);
    }

    if args.demo {
        require_schema(db, &args.db_path).await?;
        summary.demo = Some(demo::run(db, &args.db_path, args.json).await?);
    }

    Ok(summary)
}

async fn require_schema(db: &ShopDb, db_path: &Path) -> anyhow::Result<()> {
    if !db.is_initialized().await? {
        return Err(HelpfulError::schema_not_initialized(db_path).into());
    }
    Ok(())
}
