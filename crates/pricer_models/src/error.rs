//! Scenario validation errors.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{Date, DateError, PricingError};
use thiserror::Error;

/// Errors raised while assembling or validating a pricing scenario.
///
/// Every variant is an invalid-scenario condition: the evaluation cannot
/// start and no engine is run.
///
/// # Examples
/// ```
/// use pricer_models::ScenarioError;
///
/// let err = ScenarioError::InvalidSpot { spot: -1.0 };
/// assert!(err.to_string().contains("spot"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScenarioError {
    /// Spot price non-positive or non-finite.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The rejected spot
        spot: f64,
    },

    /// Strike price non-positive or non-finite.
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Volatility non-positive or non-finite.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// A rate or move fraction is NaN or infinite.
    #[error("Non-finite {field}: {value}")]
    NonFinite {
        /// Name of the offending input
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Exercise date not strictly after the (shifted) valuation date.
    #[error("Exercise date {exercise} must be after valuation date {valuation}")]
    ExerciseNotAfterValuation {
        /// Valuation date after applying the holding period
        valuation: Date,
        /// Exercise date
        exercise: Date,
    },

    /// Spot move of -100% or worse leaves no positive underlying.
    #[error("Effective spot must be positive: S = {spot}")]
    NonPositiveEffectiveSpot {
        /// Spot after the move
        spot: f64,
    },

    /// Required builder field not supplied.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Field name
        field: &'static str,
    },

    /// Date arithmetic failed.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Flat market data could not be constructed.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

impl From<ScenarioError> for PricingError {
    fn from(err: ScenarioError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
