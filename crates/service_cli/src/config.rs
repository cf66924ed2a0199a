//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line arguments.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Config file
//! 4. Default values (the built-in sample scenario)

use std::path::Path;
use std::str::FromStr;

use pricer_core::types::{Date, DayCountConvention, OptionKind};
use pricer_models::ScenarioParameters;
use pricer_pricing::{EngineSet, PipelineConfig, PricingPipeline};
use pricer_risk::{ParallelConfig, TableBuilder};
use serde::Deserialize;
use thiserror::Error;

use crate::error::{CliError, Result};

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "AMERPRICE_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// File could not be read or parsed
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Per-evaluation detail
    Debug,
    /// Progress messages
    Info,
    /// Engine and cell failures only
    #[default]
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Scenario as written in the configuration file.
///
/// Option kind and dates stay textual until [`ScenarioConfig::to_parameters`]
/// so that they are parsed exactly once, with the pricer's own parsers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// `"call"` or `"put"`, any case
    pub option_kind: String,
    /// Current spot
    pub spot_price: f64,
    /// Strike
    pub strike_price: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Continuously compounded risk-free rate
    pub risk_free_rate: f64,
    /// Continuous dividend yield
    pub dividend_rate: f64,
    /// `YYYY-MM-DD`
    pub valuation_date: String,
    /// `YYYY-MM-DD`
    pub exercise_date: String,
    /// Holding period in calendar days
    pub days_held: u32,
    /// Relative spot move, e.g. `0.05`
    pub spot_move_fraction: f64,
    /// Day count for time to expiry
    pub day_count: DayCountConvention,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            option_kind: "put".to_string(),
            spot_price: 15.50,
            strike_price: 20.0,
            volatility: 0.5815,
            risk_free_rate: 0.0152,
            dividend_rate: 0.0135,
            valuation_date: "2021-10-06".to_string(),
            exercise_date: "2021-11-19".to_string(),
            days_held: 5,
            spot_move_fraction: 0.05,
            day_count: DayCountConvention::Actual365Fixed,
        }
    }
}

impl ScenarioConfig {
    /// Parses and validates into pricer input.
    ///
    /// # Errors
    /// - `CliError::Pricing` for an unknown option kind
    /// - `CliError::Date` for a malformed date
    /// - `CliError::Scenario` if the scenario is invalid
    pub fn to_parameters(&self) -> Result<ScenarioParameters> {
        let kind = OptionKind::from_str(&self.option_kind)?;
        let scenario = ScenarioParameters::builder()
            .option_kind(kind)
            .spot_price(self.spot_price)
            .strike_price(self.strike_price)
            .volatility(self.volatility)
            .risk_free_rate(self.risk_free_rate)
            .dividend_rate(self.dividend_rate)
            .valuation_date(Date::parse(&self.valuation_date)?)
            .exercise_date(Date::parse(&self.exercise_date)?)
            .days_held(self.days_held)
            .spot_move_fraction(self.spot_move_fraction)
            .day_count(self.day_count)
            .build()?;
        Ok(scenario)
    }
}

/// Engine selection and execution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Run the engines of one evaluation in parallel
    pub parallel: bool,
    /// Engines to run; the full default set when absent
    pub list: Option<EngineSet>,
}

/// Full CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Scenario to price
    pub scenario: ScenarioConfig,
    /// Engines
    pub engines: EngineConfig,
    /// Table worker pool
    pub table: ParallelConfig,
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> std::result::Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Apply process environment overrides
    pub fn apply_env(&mut self) -> std::result::Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, log_level: Option<&str>) -> std::result::Result<(), ConfigError> {
        if let Some(level) = log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        Ok(())
    }

    /// Pipeline described by the engine section.
    pub fn pipeline(&self) -> PricingPipeline {
        let engines = self.engines.list.clone().unwrap_or_default();
        PricingPipeline::new(engines).with_config(PipelineConfig {
            parallel_engines: self.engines.parallel,
        })
    }

    /// Table builder over [`CliConfig::pipeline`].
    pub fn table_builder(&self) -> TableBuilder {
        TableBuilder::new(self.pipeline()).with_parallel_config(self.table.clone())
    }
}

/// Build configuration from all sources
///
/// # Errors
/// Any [`ConfigError`] from the file, the environment or the arguments.
pub fn build_config(path: Option<&Path>, cli_log_level: Option<&str>) -> Result<CliConfig> {
    let mut config = match path {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    config.apply_env()?;
    config.merge_with_cli(cli_log_level)?;

    if config.engines.list.as_ref().is_some_and(EngineSet::is_empty) {
        return Err(CliError::InvalidArgument(
            "engines.list must name at least one engine".to_string(),
        ));
    }
    Ok(config)
}
