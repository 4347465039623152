use crate::core::assembler::AssemblyDefaults;
use crate::core::recommender::EngineSettings;
use crate::core::ConfigProvider;
use crate::domain::model::{DemandRange, Weights};
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub engine: Option<EngineConfig>,
    pub defaults: Option<DefaultsConfig>,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub catalog_path: String,
    pub portfolio_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub min_profit_margin: Option<f64>,
    pub noise: Option<f64>,
}

/// Fallbacks for catalog entries that leave weights or demand unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub price_weight: Option<f64>,
    pub rating_weight: Option<f64>,
    pub demand_weight: Option<f64>,
    pub raw_demand: Option<f64>,
    pub demand_min: Option<f64>,
    pub demand_max: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PricingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_PATH})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PricingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.catalog_path", &self.input.catalog_path)?;
        validation::validate_path("input.portfolio_path", &self.input.portfolio_path)?;
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;

        let settings = self.engine_settings();
        validation::validate_range("engine.min_profit_margin", settings.min_profit_margin, 0.0, 10.0)?;
        validation::validate_finite("engine.noise", settings.noise)?;

        let defaults = self.assembly_defaults();
        validation::validate_weights("defaults", &defaults.weights)?;
        validation::validate_finite("defaults.raw_demand", defaults.raw_demand)?;
        if defaults.demand_range.min > defaults.demand_range.max {
            return Err(PricingError::ConfigValidationError {
                field: "defaults.demand_min".to_string(),
                message: format!(
                    "demand_min ({}) must not exceed demand_max ({})",
                    defaults.demand_range.min, defaults.demand_range.max
                ),
            });
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validation::validate_non_empty_string("logging.level", level)?;
        }

        Ok(())
    }

    /// `EnvFilter` directive for the configured level, if any.
    pub fn log_directive(&self) -> Option<String> {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .map(|level| format!("dynamic_pricing={}", level.trim()))
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_path(&self) -> &str {
        &self.input.catalog_path
    }

    fn portfolio_path(&self) -> &str {
        &self.input.portfolio_path
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn engine_settings(&self) -> EngineSettings {
        let base = EngineSettings::default();
        let engine = self.engine.clone().unwrap_or_default();
        EngineSettings {
            min_profit_margin: engine.min_profit_margin.unwrap_or(base.min_profit_margin),
            noise: engine.noise.unwrap_or(base.noise),
        }
    }

    fn assembly_defaults(&self) -> AssemblyDefaults {
        let base = AssemblyDefaults::default();
        let defaults = self.defaults.clone().unwrap_or_default();
        AssemblyDefaults {
            weights: Weights {
                price: defaults.price_weight.unwrap_or(base.weights.price),
                rating: defaults.rating_weight.unwrap_or(base.weights.rating),
                demand: defaults.demand_weight.unwrap_or(base.weights.demand),
            },
            raw_demand: defaults.raw_demand.unwrap_or(base.raw_demand),
            demand_range: DemandRange {
                min: defaults.demand_min.unwrap_or(base.demand_range.min),
                max: defaults.demand_max.unwrap_or(base.demand_range.max),
            },
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[input]
catalog_path = "data/catalog.csv"
portfolio_path = "data/portfolio.json"

[output]
output_path = "./reports"
formats = ["json", "csv"]
"#;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.catalog_path(), "data/catalog.csv");
        assert_eq!(config.engine_settings(), EngineSettings::default());
        assert_eq!(config.assembly_defaults(), AssemblyDefaults::default());
        assert_eq!(config.log_directive(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[input]
catalog_path = "catalog.json"
portfolio_path = "portfolio.toml"

[engine]
min_profit_margin = 0.25
noise = 0.0

[defaults]
price_weight = 0.5
rating_weight = 0.3
demand_weight = 0.2
raw_demand = 40.0
demand_min = 10.0
demand_max = 60.0

[output]
output_path = "./out"
formats = ["csv"]

[logging]
level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.engine_settings().min_profit_margin, 0.25);
        assert_eq!(config.engine_settings().noise, 0.0);

        let defaults = config.assembly_defaults();
        assert_eq!(defaults.weights, Weights::new(0.5, 0.3, 0.2));
        assert_eq!(defaults.raw_demand, 40.0);
        assert_eq!(defaults.demand_range, DemandRange::new(10.0, 60.0));
        assert_eq!(config.log_directive().as_deref(), Some("dynamic_pricing=debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DP_TEST_CATALOG", "/srv/pricing/catalog.csv");

        let toml_content = r#"
[input]
catalog_path = "${DP_TEST_CATALOG}"
portfolio_path = "${DP_TEST_UNSET_VARIABLE}"

[output]
output_path = "./out"
formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.catalog_path, "/srv/pricing/catalog.csv");
        assert_eq!(config.input.portfolio_path, "${DP_TEST_UNSET_VARIABLE}");

        std::env::remove_var("DP_TEST_CATALOG");
    }

    #[test]
    fn test_validation_rejects_bad_weights() {
        let toml_content = format!("{}\n[defaults]\nprice_weight = 0.9\n", MINIMAL);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_nan_margin_and_weight() {
        let toml_content = format!("{}\n[engine]\nmin_profit_margin = nan\n", MINIMAL);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.engine_settings().min_profit_margin.is_nan());
        assert!(matches!(
            config.validate(),
            Err(PricingError::InvalidConfigValueError { field, .. }) if field == "engine.min_profit_margin"
        ));

        let toml_content = format!("{}\n[defaults]\nprice_weight = nan\n", MINIMAL);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PricingError::InvalidConfigValueError { field, .. }) if field == "defaults.price"
        ));
    }

    #[test]
    fn test_validation_rejects_inverted_demand_range() {
        let toml_content = format!("{}\n[defaults]\ndemand_min = 80.0\ndemand_max = 20.0\n", MINIMAL);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PricingError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_unknown_format() {
        let toml_content = MINIMAL.replace(r#"["json", "csv"]"#, r#"["xlsx"]"#);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let err = TomlConfig::from_toml_str("[input]\ncatalog_path = \"a.csv\"\n").unwrap_err();
        assert!(matches!(err, PricingError::ConfigValidationError { field, .. } if field == "toml_parsing"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.formats.len(), 2);
    }
}
