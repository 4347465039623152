use crate::core::assembler::AssemblyDefaults;
use crate::core::recommender::{EngineSettings, DEFAULT_MIN_PROFIT_MARGIN, DEFAULT_NOISE};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "dynamic-pricing")]
#[command(about = "Suggest dynamic prices for tracked products")]
pub struct CliConfig {
    /// Catalog of competitor listings (.json, .toml or .csv)
    #[arg(long)]
    pub catalog: String,

    /// Users and the products they track (.json or .toml)
    #[arg(long)]
    pub portfolio: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub formats: Vec<String>,

    /// Minimum margin over cost, as a fraction
    #[arg(long, default_value_t = DEFAULT_MIN_PROFIT_MARGIN)]
    pub min_margin: f64,

    #[arg(long, default_value_t = DEFAULT_NOISE)]
    pub noise: f64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog
    }

    fn portfolio_path(&self) -> &str {
        &self.portfolio
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            min_profit_margin: self.min_margin,
            noise: self.noise,
        }
    }

    fn assembly_defaults(&self) -> AssemblyDefaults {
        AssemblyDefaults::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("catalog", &self.catalog)?;
        validation::validate_path("portfolio", &self.portfolio)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_range("min_margin", self.min_margin, 0.0, 10.0)?;
        validation::validate_finite("noise", self.noise)?;
        Ok(())
    }
}
