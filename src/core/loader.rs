//! Decoding of catalog and portfolio files. The format is picked from the
//! file extension.

use crate::domain::model::{Catalog, CatalogProduct, Category, Portfolio};
use crate::utils::error::{PricingError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Csv,
}

impl FileFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            Some("csv") => Ok(FileFormat::Csv),
            _ => Err(PricingError::UnsupportedFormat {
                path: path.to_string(),
            }),
        }
    }
}

fn decode_structured<T: DeserializeOwned>(path: &str, format: FileFormat, data: &[u8]) -> Result<T> {
    match format {
        FileFormat::Json => Ok(serde_json::from_slice(data)?),
        FileFormat::Toml => {
            let text = std::str::from_utf8(data).map_err(|e| PricingError::ProcessingError {
                message: format!("{} is not valid UTF-8: {}", path, e),
            })?;
            Ok(toml::from_str(text)?)
        }
        FileFormat::Csv => Err(PricingError::UnsupportedFormat {
            path: path.to_string(),
        }),
    }
}

pub fn parse_catalog(path: &str, data: &[u8]) -> Result<Catalog> {
    match FileFormat::from_path(path)? {
        FileFormat::Csv => parse_competitor_csv(data),
        format => decode_structured(path, format, data),
    }
}

pub fn parse_portfolio(path: &str, data: &[u8]) -> Result<Portfolio> {
    decode_structured(path, FileFormat::from_path(path)?, data)
}

/// One competitor listing.
#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Unit Price")]
    unit_price: String,
    #[serde(rename = "Rating", default)]
    rating: Option<String>,
    #[serde(rename = "Demand Score", default)]
    demand_score: Option<String>,
}

/// Parses a price cell such as `"₹1,299.00"` by dropping everything except
/// digits and the decimal point.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
}

/// Fills the demand range of categories that leave it unset from the lowest
/// and highest demand score among their products. A category needs at least
/// two distinct scores; otherwise the configured default range applies.
fn fill_observed_demand_ranges(catalog: &mut Catalog) {
    for category in &mut catalog.categories {
        if category.demand_min.is_some() || category.demand_max.is_some() {
            continue;
        }

        let observed = category
            .products
            .iter()
            .filter_map(|product| product.demand_score)
            .fold(None, |range: Option<(f64, f64)>, score| match range {
                Some((min, max)) => Some((min.min(score), max.max(score))),
                None => Some((score, score)),
            });

        if let Some((min, max)) = observed.filter(|(min, max)| min < max) {
            tracing::debug!(category = %category.category, min, max, "observed demand range");
            category.demand_min = Some(min);
            category.demand_max = Some(max);
        }
    }
}

/// Groups competitor listings into a catalog, one product per
/// (category, product name) pair in first-seen order. Rows that cannot be
/// decoded or carry an unreadable price are skipped with a warning.
pub fn parse_competitor_csv(data: &[u8]) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let mut catalog = Catalog::default();
    let mut category_index: HashMap<String, usize> = HashMap::new();
    let mut product_index: HashMap<(usize, String), usize> = HashMap::new();

    for (line, row) in reader.deserialize::<ListingRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) if !matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                tracing::warn!(line = line + 2, error = %e, "skipping malformed listing");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if row.category.is_empty() || row.product_name.is_empty() {
            continue;
        }

        let Some(price) = parse_price(&row.unit_price) else {
            tracing::warn!(line = line + 2, value = %row.unit_price, "skipping listing with unreadable price");
            continue;
        };

        let category_idx = *category_index
            .entry(row.category.clone())
            .or_insert_with(|| {
                catalog.categories.push(Category::new(row.category.clone()));
                catalog.categories.len() - 1
            });
        let category = &mut catalog.categories[category_idx];

        let product_idx = *product_index
            .entry((category_idx, row.product_name.clone()))
            .or_insert_with(|| {
                category.products.push(CatalogProduct {
                    product_id: None,
                    product_name: row.product_name.clone(),
                    product_costs: Vec::new(),
                    ratings: Vec::new(),
                    demand_score: None,
                });
                category.products.len() - 1
            });
        let product = &mut category.products[product_idx];

        product.product_costs.push(price);
        if let Some(rating) = parse_number(row.rating.as_deref()) {
            product.ratings.push(rating);
        }
        if let Some(demand) = parse_number(row.demand_score.as_deref()) {
            product.demand_score = Some(demand);
        }
    }

    fill_observed_demand_ranges(&mut catalog);

    tracing::debug!(
        categories = catalog.categories.len(),
        products = catalog.product_count(),
        "parsed competitor listings"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path("catalog.JSON").unwrap(), FileFormat::Json);
        assert_eq!(FileFormat::from_path("dir/portfolio.toml").unwrap(), FileFormat::Toml);
        assert_eq!(FileFormat::from_path("prices.csv").unwrap(), FileFormat::Csv);
        assert!(FileFormat::from_path("catalog.xml").is_err());
        assert!(FileFormat::from_path("catalog").is_err());
    }

    #[test]
    fn test_parse_price_strips_symbols() {
        assert_eq!(parse_price("₹1,299.50"), Some(1299.5));
        assert_eq!(parse_price(" $20 "), Some(20.0));
        assert_eq!(parse_price("n/a"), None);
    }

    #[test]
    fn test_parse_competitor_csv_groups_listings() {
        let csv = "\
Category,Product Name,Unit Price,Rating
Electronics,Headphones,\"$1,000.00\",4.5
Electronics,Headphones,$800,3.5
Books,Atlas,12.99,
Electronics,Charger,abc,4.0
";
        let catalog = parse_competitor_csv(csv.as_bytes()).unwrap();

        assert_eq!(catalog.categories.len(), 2);
        let headphones = &catalog.categories[0].products[0];
        assert_eq!(headphones.product_costs, vec![1000.0, 800.0]);
        assert_eq!(headphones.ratings, vec![4.5, 3.5]);

        // 沒有評分的列只記錄價格
        let atlas = &catalog.categories[1].products[0];
        assert_eq!(atlas.product_costs, vec![12.99]);
        assert!(atlas.ratings.is_empty());

        assert_eq!(catalog.product_count(), 2);
    }

    #[test]
    fn test_parse_competitor_csv_skips_truncated_row() {
        let csv = "\
Category,Product Name,Unit Price,Rating
Electronics,Headphones,$10,4.0
Electronics,Cable
Electronics,Headphones,$14,3.0
";
        let catalog = parse_competitor_csv(csv.as_bytes()).unwrap();

        assert_eq!(catalog.product_count(), 1);
        let headphones = &catalog.categories[0].products[0];
        assert_eq!(headphones.product_name, "Headphones");
        assert_eq!(headphones.product_costs, vec![10.0, 14.0]);
    }

    #[test]
    fn test_parse_competitor_csv_observes_demand_range() {
        let csv = "\
Category,Product Name,Unit Price,Rating,Demand Score
Electronics,Headphones,100,4.0,80
Electronics,Charger,20,3.0,20
Electronics,Cable,5,3.0,
Kitchen,Kettle,30,4.5,10
";
        let catalog = parse_competitor_csv(csv.as_bytes()).unwrap();

        let electronics = &catalog.categories[0];
        assert_eq!(electronics.demand_min, Some(20.0));
        assert_eq!(electronics.demand_max, Some(80.0));

        // 單一需求值無法構成範圍，沿用預設
        let kitchen = &catalog.categories[1];
        assert_eq!(kitchen.demand_min, None);
        assert_eq!(kitchen.demand_max, None);
    }

    #[test]
    fn test_parse_catalog_toml() {
        let toml = r#"
[[categories]]
category = "Garden"
p_weight = 0.5
r_weight = 0.3
d_weight = 0.2

[[categories.products]]
product_name = "Hose"
product_costs = [15.0, 17.5]
ratings = [4.1]
demand_score = 64.0
"#;
        let catalog = parse_catalog("catalog.toml", toml.as_bytes()).unwrap();
        let garden = &catalog.categories[0];
        assert_eq!(garden.p_weight, Some(0.5));
        assert_eq!(garden.products[0].demand_score, Some(64.0));
    }

    #[test]
    fn test_parse_portfolio_json() {
        let json = r#"{"users":[{"user_id":"u1","dashboard":[
            {"product":"Hose","io_cost":14.0,"io_rating":4.0}
        ]}]}"#;
        let portfolio = parse_portfolio("portfolio.json", json.as_bytes()).unwrap();
        assert_eq!(portfolio.tracked_count(), 1);
        assert_eq!(portfolio.users[0].user_name, None);
    }

    #[test]
    fn test_portfolio_rejects_csv() {
        assert!(matches!(
            parse_portfolio("portfolio.csv", b"a,b"),
            Err(PricingError::UnsupportedFormat { .. })
        ));
    }
}
