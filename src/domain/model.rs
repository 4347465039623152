use serde::{Deserialize, Serialize};

pub const DEFAULT_PRICE_WEIGHT: f64 = 0.7;
pub const DEFAULT_RATING_WEIGHT: f64 = 0.2;
pub const DEFAULT_DEMAND_WEIGHT: f64 = 0.1;

/// Category weighting triple. Expected to sum to 1.0, but the engine never
/// re-normalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub price: f64,
    pub rating: f64,
    pub demand: f64,
}

impl Weights {
    pub fn new(price: f64, rating: f64, demand: f64) -> Self {
        Self {
            price,
            rating,
            demand,
        }
    }

    pub fn sum(&self) -> f64 {
        self.price + self.rating + self.demand
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(
            DEFAULT_PRICE_WEIGHT,
            DEFAULT_RATING_WEIGHT,
            DEFAULT_DEMAND_WEIGHT,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandRange {
    pub min: f64,
    pub max: f64,
}

impl DemandRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Default for DemandRange {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Everything one scoring call needs.
///
/// `competitor_costs` and `competitor_ratings` are expected to be non-empty;
/// the assembler substitutes the user's own figures when the catalog has no
/// competitors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    pub user_cost: f64,
    pub user_rating: f64,
    pub competitor_costs: Vec<f64>,
    pub competitor_ratings: Vec<f64>,
    pub raw_demand: f64,
    #[serde(default)]
    pub demand_range: DemandRange,
    #[serde(default)]
    pub weights: Weights,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTriple {
    pub price_score: f64,
    pub rating_score: f64,
    pub demand_score: f64,
}

impl ScoreTriple {
    pub fn total(&self) -> f64 {
        self.price_score + self.rating_score + self.demand_score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Market value with the profit-margin floor applied.
    pub suggested_price: f64,
    /// Market value before the floor.
    pub market_value: f64,
    pub scores: ScoreTriple,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_score: f64,
    /// `None` when no product could be priced.
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub product_costs: Vec<f64>,
    #[serde(default)]
    pub ratings: Vec<f64>,
    /// Raw demand telemetry for this product, if any has been recorded.
    #[serde(default)]
    pub demand_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category: String,
    #[serde(default)]
    pub p_weight: Option<f64>,
    #[serde(default)]
    pub r_weight: Option<f64>,
    #[serde(default)]
    pub d_weight: Option<f64>,
    #[serde(default)]
    pub demand_min: Option<f64>,
    #[serde(default)]
    pub demand_max: Option<f64>,
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

impl Category {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            p_weight: None,
            r_weight: None,
            d_weight: None,
            demand_min: None,
            demand_max: None,
            products: Vec::new(),
        }
    }

    /// Category weights, each missing field falling back to `defaults`.
    pub fn weights_or(&self, defaults: Weights) -> Weights {
        Weights {
            price: self.p_weight.unwrap_or(defaults.price),
            rating: self.r_weight.unwrap_or(defaults.rating),
            demand: self.d_weight.unwrap_or(defaults.demand),
        }
    }

    pub fn demand_range_or(&self, defaults: DemandRange) -> DemandRange {
        DemandRange {
            min: self.demand_min.unwrap_or(defaults.min),
            max: self.demand_max.unwrap_or(defaults.max),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }
}

/// One product a user tracks on their dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedProduct {
    pub product: String,
    #[serde(default)]
    pub category: Option<String>,
    pub io_cost: f64,
    pub io_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPortfolio {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub dashboard: Vec<TrackedProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub users: Vec<UserPortfolio>,
}

impl Portfolio {
    pub fn tracked_count(&self) -> usize {
        self.users.iter().map(|u| u.dashboard.len()).sum()
    }
}
