//! Files written next to the store by the demo.

use serde::Serialize;
use shoplab_db::{MonthlyRevenue, PlanReport};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::chart;

pub const PLANS_FILE_NAME: &str = "query_plans.txt";
pub const CHART_FILE_NAME: &str = "monthly_revenue.svg";

/// Where the demo artifacts landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoArtifacts {
    pub plans: PathBuf,
    pub chart: PathBuf,
}

/// Write the plan report and the monthly revenue chart into `dir`.
///
/// Existing files are replaced.
pub fn write_artifacts(
    dir: &Path,
    plans: &PlanReport,
    monthly: &[MonthlyRevenue],
) -> io::Result<DemoArtifacts> {
    fs::create_dir_all(dir)?;

    let plans_path = dir.join(PLANS_FILE_NAME);
    fs::write(&plans_path, plans.render())?;

    let chart_path = dir.join(CHART_FILE_NAME);
    chart::write_monthly_revenue(monthly, &chart_path)?;

    Ok(DemoArtifacts {
        plans: plans_path,
        chart: chart_path,
    })
}
