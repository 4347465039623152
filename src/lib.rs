pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::pipelines::PortfolioPipeline;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    aggregate::summarize,
    assembler::InputAssembler,
    recommender::{recommend_price, PricingEngine},
    runner::PricingRunner,
};
pub use crate::utils::error::{PricingError, Result};
