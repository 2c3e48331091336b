//! `--seed`: load synthetic customers and orders once.

use rand::rngs::StdRng;
use rand::SeedableRng;
use shoplab::Synth;
use shoplab_db::{SeedOutcome, ShopDb};
use tracing::info;

/// Arguments for seeding
#[derive(Debug, Clone, Copy)]
pub struct SeedArgs {
    pub n_customers: usize,
    pub n_orders: usize,
    pub rng_seed: u64,
}

pub async fn run(db: &ShopDb, args: SeedArgs, json: bool) -> anyhow::Result<SeedOutcome> {
    let synth = Synth::new()?;
    let mut rng = StdRng::seed_from_u64(args.rng_seed);

    let outcome = db
        .seed(|| synth.seed_batch(&mut rng, args.n_customers, args.n_orders))
        .await?;

    match outcome {
        SeedOutcome::Seeded { customers, orders } => {
            info!(customers, orders, rng_seed = args.rng_seed, "Store seeded");
            if !json {
                println!("[OK] Loaded {} customers and {} orders", customers, orders);
            }
        }
        SeedOutcome::AlreadySeeded { existing_customers } => {
            if !json {
                println!(
                    "[INFO] Store already has {} customers; nothing seeded",
                    existing_customers
                );
            }
        }
    }

    Ok(outcome)
}
