use crate::core::assembler::AssemblyDefaults;
use crate::core::recommender::EngineSettings;
use crate::domain::model::{Catalog, Portfolio};
use crate::domain::report::PricingReport;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_path(&self) -> &str;
    fn portfolio_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn engine_settings(&self) -> EngineSettings;
    fn assembly_defaults(&self) -> AssemblyDefaults;
}

/// Everything the pricing pass needs, as loaded by `Pipeline::extract`.
#[derive(Debug, Clone, Default)]
pub struct PricingBatch {
    pub catalog: Catalog,
    pub portfolio: Portfolio,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<PricingBatch>;
    async fn transform(&self, batch: PricingBatch) -> Result<PricingReport>;
    async fn load(&self, report: PricingReport) -> Result<String>;
}
