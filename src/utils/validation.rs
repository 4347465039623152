use crate::domain::model::Weights;
use crate::utils::error::{PricingError, Result};
use std::collections::HashSet;

/// Tolerance for `price + rating + demand == 1.0`.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

pub const SUPPORTED_OUTPUT_FORMATS: [&str; 2] = ["json", "csv"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 不屬於任何範圍
    if !(min..=max).contains(&value) {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// The engine itself tolerates any weights; this only guards configuration.
pub fn validate_weights(field_name: &str, weights: &Weights) -> Result<()> {
    validate_range(&format!("{}.price", field_name), weights.price, 0.0, 1.0)?;
    validate_range(&format!("{}.rating", field_name), weights.rating, 0.0, 1.0)?;
    validate_range(&format!("{}.demand", field_name), weights.demand, 0.0, 1.0)?;

    let sum = weights.sum();
    if sum.is_nan() || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(PricingError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("Weights must sum to 1.0 (got {:.3})", sum),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(PricingError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let allowed: HashSet<&str> = SUPPORTED_OUTPUT_FORMATS.iter().copied().collect();
    for format in formats {
        if !allowed.contains(format.as_str()) {
            return Err(PricingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}
