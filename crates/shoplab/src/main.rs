//! shoplab - build, seed and query a small customers/orders store
//!
//! Usage:
//!   shoplab --init-db              Create the schema
//!   shoplab --seed                 Load synthetic customers and orders
//!   shoplab --demo                 Run the query catalog, plans, chart and rollback demo
//!   shoplab --init-db --seed --demo --db /tmp/shop.db

mod cli;

use clap::Parser;
use shoplab_logging::LogConfig;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli::config::{DB_PATH_ENV, DEFAULT_DB_PATH};
use crate::cli::seed::SeedArgs;
use crate::cli::RunArgs;

#[derive(Parser, Debug)]
#[command(
    name = "shoplab",
    version,
    about = "Synthetic shop store with an analytical query demo"
)]
struct Cli {
    /// Path to the SQLite store
    #[arg(long, env = DB_PATH_ENV, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Create the schema if it does not exist
    #[arg(long)]
    init_db: bool,

    /// Seed synthetic data (skipped when customers already exist)
    #[arg(long)]
    seed: bool,

    /// Number of customers to generate
    #[arg(long, alias = "n_customers", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(1..))]
    n_customers: u32,

    /// Number of orders to generate
    #[arg(long, alias = "n_orders", default_value_t = 2000)]
    n_orders: u32,

    /// Seed for the synthetic data generator
    #[arg(long, default_value_t = 2025)]
    rng_seed: u64,

    /// Run the demo queries, write plans and chart, show a rolled-back transaction
    #[arg(long)]
    demo: bool,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Show info-level logs on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn into_run_args(self) -> RunArgs {
        let seed = self.seed.then_some(SeedArgs {
            n_customers: self.n_customers as usize,
            n_orders: self.n_orders as usize,
            rng_seed: self.rng_seed,
        });
        RunArgs {
            db_path: self.db,
            init_db: self.init_db,
            seed,
            demo: self.demo,
            json: self.json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let args = cli.into_run_args();

    if !args.has_action() {
        println!("Nothing to do. Use --init-db / --seed / --demo");
        return ExitCode::SUCCESS;
    }

    let _log_guard = match shoplab_logging::init_logging(LogConfig {
        app_name: "shoplab",
        verbose,
        log_dir: Some(cli::config::logs_dir(&args.db_path)),
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: logging disabled: {:#}", err);
            None
        }
    };

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}
