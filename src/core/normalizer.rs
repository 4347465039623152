//! Maps raw pricing signals onto the common 1–5 scale.
//!
//! Every function here is total: degenerate inputs (zero averages, an empty
//! demand range) produce a fixed neutral value instead of an error.

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;
pub const NEUTRAL_SCORE: f64 = 3.0;

/// Returned when the demand range is empty (`min == max`).
pub const DEGENERATE_DEMAND_SCORE: f64 = 2.5;

fn clamp_score(score: f64) -> f64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// `3 + log2(value / reference)`, clamped. Equal values score exactly 3 and
/// each doubling moves the score one point.
fn log_ratio_score(value: f64, reference: f64) -> f64 {
    clamp_score(NEUTRAL_SCORE + (value / reference).log2())
}

/// Arithmetic mean; an empty slice averages to 0, which the score functions
/// treat as "no competitor data".
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Linear map of `[min_demand, max_demand]` onto `[1, 5]`. Values outside the
/// range are clamped, not extrapolated.
pub fn normalize_demand_score(raw_demand: f64, min_demand: f64, max_demand: f64) -> f64 {
    if min_demand == max_demand {
        return DEGENERATE_DEMAND_SCORE;
    }
    let position = (raw_demand - min_demand) / (max_demand - min_demand);
    clamp_score(MIN_SCORE + position * (MAX_SCORE - MIN_SCORE))
}

pub fn compute_price_score(user_price: f64, competitor_avg_price: f64) -> f64 {
    if competitor_avg_price == 0.0 || user_price == 0.0 {
        return NEUTRAL_SCORE;
    }
    log_ratio_score(user_price, competitor_avg_price)
}

/// Log-ratio of the user's rating against the competitor average, mirroring
/// the price score. A user rating of 0 saturates at 1.
pub fn compute_rating_score(user_rating: f64, competitor_avg_rating: f64) -> f64 {
    if competitor_avg_rating == 0.0 {
        return NEUTRAL_SCORE;
    }
    log_ratio_score(user_rating, competitor_avg_rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_price_score_concrete_ratios() {
        assert_eq!(compute_price_score(100.0, 100.0), 3.0);
        assert_eq!(compute_price_score(200.0, 100.0), 4.0);
        assert_eq!(compute_price_score(50.0, 100.0), 2.0);
    }

    #[test]
    fn test_price_score_saturates() {
        assert_eq!(compute_price_score(10_000.0, 1.0), MAX_SCORE);
        assert_eq!(compute_price_score(1.0, 10_000.0), MIN_SCORE);
    }

    #[test]
    fn test_price_score_zero_inputs_are_neutral() {
        assert_eq!(compute_price_score(0.0, 100.0), NEUTRAL_SCORE);
        assert_eq!(compute_price_score(100.0, 0.0), NEUTRAL_SCORE);
        assert_eq!(compute_price_score(0.0, 0.0), NEUTRAL_SCORE);
    }

    #[test]
    fn test_demand_score_concrete_values() {
        assert_eq!(normalize_demand_score(50.0, 0.0, 100.0), 3.0);
        assert_eq!(normalize_demand_score(0.0, 0.0, 100.0), 1.0);
        assert_eq!(normalize_demand_score(100.0, 0.0, 100.0), 5.0);
    }

    #[test]
    fn test_demand_score_clamps_out_of_range() {
        assert_eq!(normalize_demand_score(-40.0, 0.0, 100.0), 1.0);
        assert_eq!(normalize_demand_score(250.0, 0.0, 100.0), 5.0);
    }

    #[test]
    fn test_rating_score_uses_log_ratio() {
        assert_eq!(compute_rating_score(4.0, 4.0), 3.0);
        assert_eq!(compute_rating_score(4.0, 2.0), 4.0);
        assert_eq!(compute_rating_score(2.0, 4.0), 2.0);
    }

    #[test]
    fn test_rating_score_edge_cases() {
        assert_eq!(compute_rating_score(4.0, 0.0), NEUTRAL_SCORE);
        assert_eq!(compute_rating_score(0.0, 4.0), MIN_SCORE);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[10.0, 20.0, 30.0]), 20.0);
    }

    proptest! {
        #[test]
        fn prop_demand_score_degenerate_range_is_midpoint(
            raw in -1000.0f64..1000.0,
            bound in -1000.0f64..1000.0
        ) {
            prop_assert_eq!(normalize_demand_score(raw, bound, bound), DEGENERATE_DEMAND_SCORE);
        }

        #[test]
        fn prop_demand_score_monotonic_and_bounded(
            a in -500.0f64..500.0,
            b in -500.0f64..500.0,
            min in -100.0f64..0.0,
            width in 1.0f64..200.0
        ) {
            let max = min + width;
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low_score = normalize_demand_score(low, min, max);
            let high_score = normalize_demand_score(high, min, max);

            prop_assert!(low_score <= high_score);
            prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&low_score));
            prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&high_score));
        }

        #[test]
        fn prop_price_score_monotonic_and_bounded(
            r1 in 0.0001f64..10_000.0,
            r2 in 0.0001f64..10_000.0
        ) {
            let (low, high) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
            let low_score = compute_price_score(low * 100.0, 100.0);
            let high_score = compute_price_score(high * 100.0, 100.0);

            prop_assert!(low_score <= high_score);
            prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&low_score));
            prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&high_score));
        }
    }
}
