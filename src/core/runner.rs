use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct PricingRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PricingRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting pricing run");

        // Extract
        let batch = self.pipeline.extract().await?;
        tracing::info!(
            categories = batch.catalog.categories.len(),
            catalog_products = batch.catalog.product_count(),
            users = batch.portfolio.users.len(),
            tracked = batch.portfolio.tracked_count(),
            "Loaded catalog and portfolio"
        );

        // Transform
        let report = self.pipeline.transform(batch).await?;
        tracing::info!(
            priced = report.priced_count(),
            unresolved = report.unresolved_count(),
            "Priced tracked products"
        );
        if report.unresolved_count() > 0 {
            tracing::warn!(
                "{} tracked product(s) had no catalog match and were left out of the summaries",
                report.unresolved_count()
            );
        }

        // Load
        let output = self.pipeline.load(report).await?;
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Report written: {}",
            output
        );

        Ok(output)
    }
}
