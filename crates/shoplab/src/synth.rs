//! Seeded synthetic customers and orders.
//!
//! The generator owns its distributions; randomness comes from the caller's
//! RNG so a fixed seed always reproduces the same rows.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::LogNormal;
use shoplab_db::{NewCustomer, NewOrder, OrderStatus, SeedBatch};

pub const CITIES: [&str; 6] = [
    "Santiago",
    "Valparaíso",
    "Viña del Mar",
    "Concepción",
    "La Serena",
    "Antofagasta",
];
const CITY_WEIGHTS: [f64; 6] = [0.45, 0.12, 0.12, 0.15, 0.08, 0.08];

pub const CATEGORIES: [&str; 6] = ["Electronics", "Groceries", "Books", "Home", "Sports", "Beauty"];
const CATEGORY_WEIGHTS: [f64; 6] = [0.25, 0.20, 0.13, 0.18, 0.14, 0.10];

const STATUSES: [OrderStatus; 3] = OrderStatus::ALL;
const STATUS_WEIGHTS: [f64; 3] = [0.85, 0.10, 0.05];

const FIRST_NAMES: [&str; 8] = [
    "Ana", "Luis", "Camila", "Diego", "Matías", "Carla", "Javiera", "Pedro",
];
const LAST_NAMES: [&str; 7] = ["Pérez", "González", "Soto", "Muñoz", "Rojas", "Silva", "López"];

const SIGNUP_SPAN_DAYS: i64 = 600;
const ORDER_SPAN_DAYS: i64 = 480;

// Parameters of the underlying normal; median amount is about e^3.2 = 24.5.
const AMOUNT_MU: f64 = 3.2;
const AMOUNT_SIGMA: f64 = 0.65;

/// Customer and order generator.
#[derive(Debug, Clone)]
pub struct Synth {
    cities: WeightedIndex<f64>,
    categories: WeightedIndex<f64>,
    statuses: WeightedIndex<f64>,
    amounts: LogNormal<f64>,
    signup_start: NaiveDate,
    order_start: NaiveDate,
}

impl Synth {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cities: WeightedIndex::new(CITY_WEIGHTS).context("Invalid city weights")?,
            categories: WeightedIndex::new(CATEGORY_WEIGHTS)
                .context("Invalid category weights")?,
            statuses: WeightedIndex::new(STATUS_WEIGHTS).context("Invalid status weights")?,
            amounts: LogNormal::new(AMOUNT_MU, AMOUNT_SIGMA)
                .context("Invalid amount distribution")?,
            signup_start: NaiveDate::from_ymd_opt(2023, 1, 1).context("Invalid signup start")?,
            order_start: NaiveDate::from_ymd_opt(2023, 6, 1).context("Invalid order start")?,
        })
    }

    /// `n` customers with emails `user0@example.com` .. `user{n-1}@example.com`.
    pub fn customers<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<NewCustomer> {
        (0..n)
            .map(|i| NewCustomer {
                first_name: pick(rng, &FIRST_NAMES).to_string(),
                last_name: pick(rng, &LAST_NAMES).to_string(),
                email: format!("user{}@example.com", i),
                city: Some(CITIES[self.cities.sample(rng)].to_string()),
                signup_date: self.signup_start + Duration::days(rng.gen_range(0..SIGNUP_SPAN_DAYS)),
            })
            .collect()
    }

    /// `n` orders referencing customer ids `1..=n_customers`.
    ///
    /// Ids assume customers were inserted into an empty table. With no
    /// customers there is nothing to reference and no orders are produced.
    pub fn orders<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
        n_customers: usize,
    ) -> Vec<NewOrder> {
        if n_customers == 0 {
            return Vec::new();
        }
        let max_id = n_customers as i64;

        (0..n)
            .map(|_| NewOrder {
                customer_id: rng.gen_range(1..=max_id),
                order_date: self.order_start + Duration::days(rng.gen_range(0..ORDER_SPAN_DAYS)),
                category: CATEGORIES[self.categories.sample(rng)].to_string(),
                amount: round_cents(self.amounts.sample(rng)),
                status: STATUSES[self.statuses.sample(rng)],
            })
            .collect()
    }

    /// Customers and the orders that reference them.
    pub fn seed_batch<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n_customers: usize,
        n_orders: usize,
    ) -> SeedBatch {
        let customers = self.customers(rng, n_customers);
        let orders = self.orders(rng, n_orders, n_customers);
        SeedBatch { customers, orders }
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values[rng.gen_range(0..values.len())]
}

/// Two decimals, never below one cent.
fn round_cents(amount: f64) -> f64 {
    ((amount * 100.0).round() / 100.0).max(0.01)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_rows() {
        let synth = Synth::new().unwrap();
        let a = synth.seed_batch(&mut StdRng::seed_from_u64(2025), 50, 200);
        let b = synth.seed_batch(&mut StdRng::seed_from_u64(2025), 50, 200);
        assert_eq!(a.customers, b.customers);
        assert_eq!(a.orders, b.orders);

        let c = synth.seed_batch(&mut StdRng::seed_from_u64(7), 50, 200);
        assert_ne!(a.orders, c.orders);
    }

    #[test]
    fn test_customers_have_unique_emails_and_known_cities() {
        let synth = Synth::new().unwrap();
        let customers = synth.customers(&mut StdRng::seed_from_u64(1), 300);

        let emails: HashSet<_> = customers.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(emails.len(), 300);
        assert_eq!(customers[0].email, "user0@example.com");

        let last_signup = synth.signup_start + Duration::days(SIGNUP_SPAN_DAYS - 1);
        for customer in &customers {
            let city = customer.city.as_deref().unwrap();
            assert!(CITIES.contains(&city), "{city}");
            assert!(customer.signup_date >= synth.signup_start);
            assert!(customer.signup_date <= last_signup);
        }
    }

    #[test]
    fn test_orders_stay_in_bounds() {
        let synth = Synth::new().unwrap();
        let orders = synth.orders(&mut StdRng::seed_from_u64(3), 2000, 40);

        let last_order = synth.order_start + Duration::days(ORDER_SPAN_DAYS - 1);
        for order in &orders {
            assert!((1..=40).contains(&order.customer_id));
            assert!(order.amount > 0.0);
            assert_eq!(order.amount, round_cents(order.amount));
            assert!(CATEGORIES.contains(&order.category.as_str()));
            assert!(order.order_date >= synth.order_start && order.order_date <= last_order);
        }
    }

    #[test]
    fn test_status_mix_is_mostly_paid() {
        let synth = Synth::new().unwrap();
        let orders = synth.orders(&mut StdRng::seed_from_u64(11), 4000, 10);

        let paid = orders.iter().filter(|o| o.status == OrderStatus::Paid).count();
        let share = paid as f64 / orders.len() as f64;
        assert!((0.80..0.90).contains(&share), "paid share {share}");
    }

    #[test]
    fn test_no_customers_no_orders() {
        let synth = Synth::new().unwrap();
        assert!(synth.orders(&mut StdRng::seed_from_u64(0), 10, 0).is_empty());
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(24.456), 24.46);
        assert_eq!(round_cents(0.001), 0.01);
    }
}
