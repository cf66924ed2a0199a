//! CLI error types

use pricer_core::types::{DateError, PricingError};
use pricer_models::ScenarioError;
use pricer_pricing::EstimateError;
use pricer_risk::TableError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI result type
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line or configuration value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Date in the configuration could not be parsed
    #[error("{0}")]
    Date(#[from] DateError),

    /// Scenario rejected
    #[error("Invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),

    /// Baseline price could not be computed
    #[error("Pricing error: {0}")]
    Estimate(#[from] EstimateError),

    /// Sensitivity table could not be built
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Generic pricing error
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}
