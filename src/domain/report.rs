use crate::domain::model::{PortfolioSummary, PriceRange, PricingResult, TrackedProduct};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rounds to two decimal places. Only applied at the output boundary.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedProduct {
    pub product_name: String,
    pub io_cost: f64,
    pub io_rating: f64,
    pub dynamic_price: f64,
    pub market_value: f64,
    pub price_score: f64,
    pub rating_score: f64,
    pub demand_score: f64,
}

impl PricedProduct {
    pub fn from_result(entry: &TrackedProduct, result: &PricingResult) -> Self {
        Self {
            product_name: entry.product.clone(),
            io_cost: entry.io_cost,
            io_rating: entry.io_rating,
            dynamic_price: round2(result.suggested_price),
            market_value: round2(result.market_value),
            price_score: round2(result.scores.price_score),
            rating_score: round2(result.scores.rating_score),
            demand_score: round2(result.scores.demand_score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPricingReport {
    pub user_id: String,
    pub user_name: Option<String>,
    pub total_score: f64,
    pub price_range: Option<PriceRange>,
    pub dashboard: Vec<PricedProduct>,
    /// Tracked products with no catalog match.
    pub unresolved: Vec<String>,
}

impl UserPricingReport {
    pub fn new(
        user_id: String,
        user_name: Option<String>,
        summary: &PortfolioSummary,
        dashboard: Vec<PricedProduct>,
        unresolved: Vec<String>,
    ) -> Self {
        Self {
            user_id,
            user_name,
            total_score: round2(summary.total_score),
            price_range: summary.price_range.map(|range| PriceRange {
                min: round2(range.min),
                max: round2(range.max),
            }),
            dashboard,
            unresolved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingReport {
    pub generated_at: DateTime<Utc>,
    pub users: Vec<UserPricingReport>,
}

impl PricingReport {
    pub fn new(users: Vec<UserPricingReport>) -> Self {
        Self {
            generated_at: Utc::now(),
            users,
        }
    }

    pub fn priced_count(&self) -> usize {
        self.users.iter().map(|u| u.dashboard.len()).sum()
    }

    pub fn unresolved_count(&self) -> usize {
        self.users.iter().map(|u| u.unresolved.len()).sum()
    }
}
