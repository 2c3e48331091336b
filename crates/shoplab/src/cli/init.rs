//! `--init-db`: create the schema.

use serde::Serialize;
use shoplab_db::ShopDb;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct InitSummary {
    pub db_path: PathBuf,
}

pub async fn run(db: &ShopDb, db_path: &Path, json: bool) -> anyhow::Result<InitSummary> {
    db.ensure_schema().await?;

    if !json {
        println!("[OK] Schema ready at {}", db_path.display());
    }
    Ok(InitSummary {
        db_path: db_path.to_path_buf(),
    })
}
