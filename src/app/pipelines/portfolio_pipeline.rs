use crate::core::loader::{parse_catalog, parse_portfolio};
use crate::core::{price_batch, ConfigProvider, Pipeline, PricingBatch, PricingReport, Storage};
use crate::utils::error::{PricingError, Result};
use serde::Serialize;
use std::path::Path;

pub const JSON_REPORT_FILENAME: &str = "pricing_report.json";
pub const CSV_REPORT_FILENAME: &str = "pricing_report.csv";

/// Reads a catalog and a portfolio, prices every tracked product and writes
/// the report in the configured formats.
pub struct PortfolioPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PortfolioPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, filename: &str) -> String {
        Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .into_owned()
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    user_id: &'a str,
    product_name: &'a str,
    io_cost: f64,
    io_rating: f64,
    dynamic_price: f64,
    market_value: f64,
    price_score: f64,
    rating_score: f64,
    demand_score: f64,
}

pub fn render_json(report: &PricingReport) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(report)?)
}

/// One row per priced product; unresolved entries are not listed.
pub fn render_csv(report: &PricingReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for user in &report.users {
        for product in &user.dashboard {
            writer.serialize(CsvRow {
                user_id: &user.user_id,
                product_name: &product.product_name,
                io_cost: product.io_cost,
                io_rating: product.io_rating,
                dynamic_price: product.dynamic_price,
                market_value: product.market_value,
                price_score: product.price_score,
                rating_score: product.rating_score,
                demand_score: product.demand_score,
            })?;
        }
    }

    writer.into_inner().map_err(|e| PricingError::ProcessingError {
        message: format!("Failed to flush CSV report: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PortfolioPipeline<S, C> {
    async fn extract(&self) -> Result<PricingBatch> {
        let catalog_path = self.config.catalog_path();
        let portfolio_path = self.config.portfolio_path();

        tracing::debug!("Reading catalog from: {}", catalog_path);
        let catalog_bytes = self.storage.read_file(catalog_path).await?;
        let catalog = parse_catalog(catalog_path, &catalog_bytes)?;

        tracing::debug!("Reading portfolio from: {}", portfolio_path);
        let portfolio_bytes = self.storage.read_file(portfolio_path).await?;
        let portfolio = parse_portfolio(portfolio_path, &portfolio_bytes)?;

        if catalog.categories.is_empty() {
            tracing::warn!("Catalog {} has no categories, every product will be unresolved", catalog_path);
        }

        Ok(PricingBatch { catalog, portfolio })
    }

    async fn transform(&self, batch: PricingBatch) -> Result<PricingReport> {
        let settings = self.config.engine_settings();
        let defaults = self.config.assembly_defaults();
        tracing::debug!(
            min_profit_margin = settings.min_profit_margin,
            noise = settings.noise,
            "Pricing with engine settings"
        );

        Ok(price_batch(&batch, settings, defaults))
    }

    async fn load(&self, report: PricingReport) -> Result<String> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let (filename, data) = match format.as_str() {
                "json" => (JSON_REPORT_FILENAME, render_json(&report)?),
                "csv" => (CSV_REPORT_FILENAME, render_csv(&report)?),
                other => {
                    return Err(PricingError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported report format".to_string(),
                    })
                }
            };

            let path = self.output_file(filename);
            self.storage.write_file(&path, &data).await?;
            tracing::debug!("Wrote {} ({} bytes)", path, data.len());
            written.push(path);
        }

        Ok(written.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PriceRange;
    use crate::domain::report::{PricedProduct, UserPricingReport};

    fn report() -> PricingReport {
        PricingReport::new(vec![UserPricingReport {
            user_id: "u1".to_string(),
            user_name: Some("Ana".to_string()),
            total_score: 9.5,
            price_range: Some(PriceRange {
                min: 11.5,
                max: 11.5,
            }),
            dashboard: vec![PricedProduct {
                product_name: "Kite".to_string(),
                io_cost: 10.0,
                io_rating: 4.0,
                dynamic_price: 11.5,
                market_value: 9.21,
                price_score: 2.0,
                rating_score: 3.0,
                demand_score: 3.0,
            }],
            unresolved: vec!["Yo-yo".to_string()],
        }])
    }

    #[test]
    fn test_render_csv() {
        let csv = String::from_utf8(render_csv(&report()).unwrap()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("user_id,product_name,io_cost,io_rating,dynamic_price,market_value,price_score,rating_score,demand_score")
        );
        assert_eq!(lines.next(), Some("u1,Kite,10.0,4.0,11.5,9.21,2.0,3.0,3.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_render_json() {
        let json: serde_json::Value =
            serde_json::from_slice(&render_json(&report()).unwrap()).unwrap();
        assert_eq!(json["users"][0]["dashboard"][0]["dynamic_price"], 11.5);
        assert_eq!(json["users"][0]["unresolved"][0], "Yo-yo");
        assert!(json["generated_at"].is_string());
    }
}
