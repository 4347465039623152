use crate::core::assembler::InputAssembler;
use crate::core::recommender::PricingEngine;
use crate::domain::model::{PortfolioSummary, PriceRange, PricingResult, UserPortfolio};
use crate::domain::report::{PricedProduct, UserPricingReport};
use crate::utils::error::PricingError;

/// Sums every result's three scores and spans the suggested prices. An empty
/// input yields a zero total and no price range.
pub fn summarize<'a, I>(results: I) -> PortfolioSummary
where
    I: IntoIterator<Item = &'a PricingResult>,
{
    let mut total_score = 0.0;
    let mut price_range: Option<PriceRange> = None;

    for result in results {
        total_score += result.scores.total();
        let price = result.suggested_price;
        price_range = Some(match price_range {
            Some(range) => PriceRange {
                min: range.min.min(price),
                max: range.max.max(price),
            },
            None => PriceRange {
                min: price,
                max: price,
            },
        });
    }

    PortfolioSummary {
        total_score,
        price_range,
    }
}

/// Prices every tracked product of `user` and summarizes the ones that
/// resolved. Entries with no catalog match are listed in `unresolved`.
pub fn price_portfolio(
    engine: &PricingEngine,
    assembler: &InputAssembler<'_>,
    user: &UserPortfolio,
) -> UserPricingReport {
    let mut results = Vec::with_capacity(user.dashboard.len());
    let mut dashboard = Vec::with_capacity(user.dashboard.len());
    let mut unresolved = Vec::new();

    for entry in &user.dashboard {
        match assembler.assemble(entry) {
            Ok(input) => {
                let result = engine.recommend(&input);
                dashboard.push(PricedProduct::from_result(entry, &result));
                results.push(result);
            }
            Err(PricingError::UnresolvableProduct { product }) => {
                tracing::warn!(user = %user.user_id, %product, "skipping product with no catalog match");
                unresolved.push(product);
            }
            Err(e) => {
                tracing::warn!(user = %user.user_id, product = %entry.product, "skipping product: {}", e);
                unresolved.push(entry.product.clone());
            }
        }
    }

    let summary = summarize(&results);
    tracing::debug!(
        user = %user.user_id,
        priced = results.len(),
        unresolved = unresolved.len(),
        total_score = summary.total_score,
        "summarized portfolio"
    );

    UserPricingReport::new(
        user.user_id.clone(),
        user.user_name.clone(),
        &summary,
        dashboard,
        unresolved,
    )
}
