pub mod aggregate;
pub mod assembler;
pub mod loader;
pub mod normalizer;
pub mod recommender;
pub mod runner;

pub use crate::domain::model::{Catalog, Portfolio, PricingInput, PricingResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, PricingBatch, Storage};
pub use crate::domain::report::PricingReport;
pub use crate::utils::error::Result;

use assembler::{AssemblyDefaults, InputAssembler};
use recommender::{EngineSettings, PricingEngine};

/// Prices every user in `batch` against its catalog.
pub fn price_batch(
    batch: &PricingBatch,
    settings: EngineSettings,
    defaults: AssemblyDefaults,
) -> PricingReport {
    let engine = PricingEngine::new(settings);
    let assembler = InputAssembler::new(&batch.catalog, defaults);
    tracing::debug!(
        min_profit_margin = engine.settings().min_profit_margin,
        noise = engine.settings().noise,
        users = batch.portfolio.users.len(),
        "pricing batch"
    );

    let users = batch
        .portfolio
        .users
        .iter()
        .map(|user| aggregate::price_portfolio(&engine, &assembler, user))
        .collect();

    PricingReport::new(users)
}
