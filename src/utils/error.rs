use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Product '{product}' has no matching catalog entry")]
    UnresolvableProduct { product: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Catalog,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PricingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PricingError::IoError(_) => ErrorCategory::Io,
            PricingError::SerializationError(_)
            | PricingError::TomlError(_)
            | PricingError::CsvError(_)
            | PricingError::UnsupportedFormat { .. } => ErrorCategory::Data,
            PricingError::ConfigError { .. }
            | PricingError::ConfigValidationError { .. }
            | PricingError::InvalidConfigValueError { .. }
            | PricingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PricingError::UnresolvableProduct { .. } => ErrorCategory::Catalog,
            PricingError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一商品無法對應目錄不影響整批計算
            ErrorCategory::Catalog => ErrorSeverity::Low,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PricingError::IoError(_) => {
                "Check that the input files exist and the output directory is writable".to_string()
            }
            PricingError::SerializationError(_) | PricingError::TomlError(_) => {
                "Check the catalog and portfolio files for syntax errors".to_string()
            }
            PricingError::CsvError(_) => {
                "Make sure the CSV has the columns: Category, Product Name, Unit Price, Rating"
                    .to_string()
            }
            PricingError::UnsupportedFormat { .. } => {
                "Use a .json, .toml or .csv file".to_string()
            }
            PricingError::ConfigError { .. }
            | PricingError::ConfigValidationError { .. }
            | PricingError::InvalidConfigValueError { .. }
            | PricingError::MissingConfigError { .. } => {
                "Review the configuration file or command-line flags".to_string()
            }
            PricingError::UnresolvableProduct { product } => format!(
                "Add '{}' to the catalog or fix the product name on the dashboard",
                product
            ),
            PricingError::ProcessingError { .. } => {
                "Re-run with --verbose to see which entry failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Data => format!("Input data could not be parsed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Catalog => format!("Catalog lookup failed: {}", self),
            ErrorCategory::Processing => format!("Pricing failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
