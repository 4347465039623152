use crate::core::normalizer::{
    average, compute_price_score, compute_rating_score, normalize_demand_score, MAX_SCORE,
};
use crate::domain::model::{PricingInput, PricingResult, ScoreTriple, Weights};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_PROFIT_MARGIN: f64 = 0.15;

/// Constant added to every market value so that equal inputs across
/// products do not tie exactly.
pub const DEFAULT_NOISE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub min_profit_margin: f64,
    pub noise: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_profit_margin: DEFAULT_MIN_PROFIT_MARGIN,
            noise: DEFAULT_NOISE,
        }
    }
}

/// `competitor_avg_price * (weighted scores) / 5 + noise`.
///
/// The divisor is the top of the score scale, not the weight sum, so the
/// market value equals the competitor average (plus noise) when every score
/// is 5 and the weights sum to 1.
pub fn compute_market_value(
    scores: &ScoreTriple,
    weights: &Weights,
    competitor_avg_price: f64,
    noise: f64,
) -> f64 {
    let weighted = weights.price * scores.price_score
        + weights.rating * scores.rating_score
        + weights.demand * scores.demand_score;
    competitor_avg_price * weighted / MAX_SCORE + noise
}

pub fn enforce_profit_margin(suggested_price: f64, cost_price: f64, min_margin: f64) -> f64 {
    suggested_price.max(cost_price * (1.0 + min_margin))
}

pub fn compute_scores(input: &PricingInput, competitor_avg_price: f64) -> ScoreTriple {
    ScoreTriple {
        price_score: compute_price_score(input.user_cost, competitor_avg_price),
        rating_score: compute_rating_score(
            input.user_rating,
            average(&input.competitor_ratings),
        ),
        demand_score: normalize_demand_score(
            input.raw_demand,
            input.demand_range.min,
            input.demand_range.max,
        ),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine {
    settings: EngineSettings,
}

impl PricingEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn recommend(&self, input: &PricingInput) -> PricingResult {
        let competitor_avg_price = average(&input.competitor_costs);
        let scores = compute_scores(input, competitor_avg_price);

        let market_value = compute_market_value(
            &scores,
            &input.weights,
            competitor_avg_price,
            self.settings.noise,
        );
        let suggested_price = enforce_profit_margin(
            market_value,
            input.user_cost,
            self.settings.min_profit_margin,
        );

        tracing::trace!(
            competitor_avg_price,
            price_score = scores.price_score,
            rating_score = scores.rating_score,
            demand_score = scores.demand_score,
            market_value,
            suggested_price,
            "priced input"
        );

        PricingResult {
            suggested_price,
            market_value,
            scores,
        }
    }
}

/// Prices `input` with the default margin and noise.
pub fn recommend_price(input: &PricingInput) -> PricingResult {
    PricingEngine::default().recommend(input)
}
