//! Row types for the customers/orders store.
//!
//! `New*` types are write-path inputs; the rest are query outputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Write Types
// ============================================================================

/// Status of an order. The same set is enforced by a CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Paid,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Paid, Self::Cancelled, Self::Refunded];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
            Self::Refunded => "REFUNDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PAID" => Some(Self::Paid),
            "CANCELLED" => Some(Self::Cancelled),
            "REFUNDED" => Some(Self::Refunded),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer row to insert. `customer_id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    /// Must be unique across the customers table
    pub email: String,
    pub city: Option<String>,
    pub signup_date: NaiveDate,
}

/// An order row to insert. `order_id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Must reference an existing customer
    pub customer_id: i64,
    pub order_date: NaiveDate,
    pub category: String,
    pub amount: f64,
    pub status: OrderStatus,
}

/// Everything a seeding run writes, customers first.
#[derive(Debug, Clone, Default)]
pub struct SeedBatch {
    pub customers: Vec<NewCustomer>,
    pub orders: Vec<NewOrder>,
}

/// Result of a seeding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SeedOutcome {
    /// Both batches committed
    Seeded { customers: u64, orders: u64 },
    /// The store already had customers; nothing was written
    AlreadySeeded { existing_customers: i64 },
}

// ============================================================================
// Query Catalog Types
// ============================================================================

/// Row of `top_customers`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCustomer {
    pub customer_id: i64,
    pub customer: String,
    pub city: Option<String>,
    pub revenue: f64,
}

/// Row of `monthly_revenue`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// Calendar month as `YYYY-MM`
    pub ym: String,
    pub revenue: f64,
}

/// Row of `category_city_matrix`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCityRevenue {
    pub city: Option<String>,
    pub category: String,
    pub revenue: f64,
}

/// Row of `window_rank_in_city`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRank {
    pub city: Option<String>,
    pub customer: String,
    pub revenue: f64,
    /// 1-based row number within the city
    pub rn: i64,
}
