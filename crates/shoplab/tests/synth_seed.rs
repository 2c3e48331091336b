//! Generated batches against a real store.

use rand::rngs::StdRng;
use rand::SeedableRng;
use shoplab::Synth;
use shoplab_db::{SeedOutcome, ShopDb};
use tempfile::TempDir;

async fn seeded(tmp: &TempDir, seed: u64) -> ShopDb {
    let db = ShopDb::open(tmp.path().join("shop.db")).await.unwrap();
    db.ensure_schema().await.unwrap();

    let synth = Synth::new().unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let outcome = db
        .seed(|| synth.seed_batch(&mut rng, 120, 900))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        SeedOutcome::Seeded {
            customers: 120,
            orders: 900
        }
    );
    db
}

#[tokio::test]
async fn generated_orders_satisfy_constraints() {
    let tmp = TempDir::new().unwrap();
    let db = seeded(&tmp, 2025).await;

    assert_eq!(db.customer_count().await.unwrap(), 120);
    assert_eq!(db.order_count().await.unwrap(), 900);
}

#[tokio::test]
async fn same_seed_same_catalog_results() {
    let a_dir = TempDir::new().unwrap();
    let b_dir = TempDir::new().unwrap();
    let a = seeded(&a_dir, 42).await;
    let b = seeded(&b_dir, 42).await;

    assert_eq!(a.top_customers().await.unwrap(), b.top_customers().await.unwrap());
    assert_eq!(a.monthly_revenue().await.unwrap(), b.monthly_revenue().await.unwrap());
}

#[tokio::test]
async fn catalog_shapes_on_generated_data() {
    let tmp = TempDir::new().unwrap();
    let db = seeded(&tmp, 7).await;

    let top = db.top_customers().await.unwrap();
    assert_eq!(top.len(), 10);
    assert!(top.windows(2).all(|w| w[0].revenue >= w[1].revenue));

    let months = db.monthly_revenue().await.unwrap();
    assert!(months.windows(2).all(|w| w[0].ym < w[1].ym));
    // 480 days starting 2023-06-01 span 16 calendar months
    assert!(months.len() <= 16);

    let ranks = db.window_rank_in_city().await.unwrap();
    assert!(ranks.iter().all(|r| (1..=3).contains(&r.rn)));
}
