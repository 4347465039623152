pub mod portfolio_pipeline;

pub use portfolio_pipeline::PortfolioPipeline;
