use crate::domain::model::{
    Catalog, CatalogProduct, Category, DemandRange, PricingInput, TrackedProduct, Weights,
};
use crate::utils::error::{PricingError, Result};
use serde::{Deserialize, Serialize};

/// Raw demand assumed for products with no recorded telemetry.
pub const DEFAULT_RAW_DEMAND: f64 = 50.0;

/// Fallbacks used when a catalog entry leaves a field unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyDefaults {
    pub weights: Weights,
    pub raw_demand: f64,
    pub demand_range: DemandRange,
}

impl Default for AssemblyDefaults {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            raw_demand: DEFAULT_RAW_DEMAND,
            demand_range: DemandRange::default(),
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Builds `PricingInput`s for tracked products by matching them against a
/// catalog.
#[derive(Debug, Clone)]
pub struct InputAssembler<'a> {
    catalog: &'a Catalog,
    defaults: AssemblyDefaults,
}

impl<'a> InputAssembler<'a> {
    pub fn new(catalog: &'a Catalog, defaults: AssemblyDefaults) -> Self {
        Self { catalog, defaults }
    }

    /// Finds the catalog record for `entry`. When the entry names a category
    /// only that category is searched.
    pub fn resolve(&self, entry: &TrackedProduct) -> Result<(&'a Category, &'a CatalogProduct)> {
        let catalog: &'a Catalog = self.catalog;
        catalog
            .categories
            .iter()
            .filter(|category| match &entry.category {
                Some(name) => same_name(&category.category, name),
                None => true,
            })
            .find_map(|category| {
                category
                    .products
                    .iter()
                    .find(|product| same_name(&product.product_name, &entry.product))
                    .map(|product| (category, product))
            })
            .ok_or_else(|| PricingError::UnresolvableProduct {
                product: entry.product.clone(),
            })
    }

    pub fn assemble(&self, entry: &TrackedProduct) -> Result<PricingInput> {
        let (category, product) = self.resolve(entry)?;

        // 沒有競品資料時以使用者自己的數字比較，避免除以零
        let competitor_costs = if product.product_costs.is_empty() {
            tracing::debug!(product = %entry.product, "no competitor costs, comparing against own cost");
            vec![entry.io_cost]
        } else {
            product.product_costs.clone()
        };
        let competitor_ratings = if product.ratings.is_empty() {
            tracing::debug!(product = %entry.product, "no competitor ratings, comparing against own rating");
            vec![entry.io_rating]
        } else {
            product.ratings.clone()
        };

        Ok(PricingInput {
            user_cost: entry.io_cost,
            user_rating: entry.io_rating,
            competitor_costs,
            competitor_ratings,
            raw_demand: product.demand_score.unwrap_or(self.defaults.raw_demand),
            demand_range: category.demand_range_or(self.defaults.demand_range),
            weights: category.weights_or(self.defaults.weights),
        })
    }
}
