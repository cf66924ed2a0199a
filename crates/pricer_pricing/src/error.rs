//! Error types for engines and price estimation.

use pricer_core::types::{InterpolationError, PricingError, SolverError};
use pricer_models::analytical::AnalyticalError;
use pricer_models::ScenarioError;
use thiserror::Error;

/// Failure of a single pricing engine.
///
/// An engine failure never aborts an evaluation: the engine is excluded
/// from the mean and reported alongside the estimate.
///
/// # Examples
/// ```
/// use pricer_pricing::EngineError;
///
/// let err = EngineError::InvalidProbability { scheme: "Tian", probability: 1.2 };
/// assert_eq!(err.to_string(), "Tian branch probability 1.2 outside (0, 1)");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    /// Closed-form approximation failed.
    #[error("{0}")]
    Analytical(#[from] AnalyticalError),

    /// Linear solve failed during time stepping.
    #[error("{0}")]
    Solver(#[from] SolverError),

    /// Value lookup at the spot failed.
    #[error("{0}")]
    Interpolation(#[from] InterpolationError),

    /// Market data lookup failed.
    #[error("{0}")]
    Market(#[from] ScenarioError),

    /// Tree branch probability is not a probability.
    #[error("{scheme} branch probability {probability} outside (0, 1)")]
    InvalidProbability {
        /// Tree scheme name
        scheme: &'static str,
        /// Offending probability
        probability: f64,
    },

    /// Grid or step settings unusable.
    #[error("Invalid engine configuration: {message}")]
    InvalidConfiguration {
        /// What is wrong
        message: String,
    },

    /// Price above the no-arbitrage cap: spot for a call, strike for a put.
    #[error("{engine} price {price} exceeds the upper bound {bound}")]
    AboveUpperBound {
        /// Engine name
        engine: &'static str,
        /// Offending price
        price: f64,
        /// Spot or strike
        bound: f64,
    },

    /// Engine produced NaN or infinity.
    #[error("{engine} produced a non-finite price")]
    NonFinite {
        /// Engine name
        engine: &'static str,
    },
}

/// Failure of a whole evaluation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EstimateError {
    /// Scenario rejected before any engine ran.
    #[error("Invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),

    /// Every engine failed.
    #[error("No engine produced a price ({failed} failed)")]
    NoEnginesAvailable {
        /// Number of engines that failed
        failed: usize,
    },
}

impl From<EngineError> for PricingError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidConfiguration { .. } | EngineError::Market(_) => {
                PricingError::InvalidInput(err.to_string())
            }
            _ => PricingError::ModelFailure(err.to_string()),
        }
    }
}

impl From<EstimateError> for PricingError {
    fn from(err: EstimateError) -> Self {
        match err {
            EstimateError::Scenario(inner) => inner.into(),
            EstimateError::NoEnginesAvailable { .. } => PricingError::ModelFailure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_wraps_lower_layers() {
        let err: EngineError = SolverError::SingularMatrix { row: 3 }.into();
        assert!(matches!(err, EngineError::Solver(_)));

        let err: EngineError = AnalyticalError::InvalidStrike { strike: 0.0 }.into();
        assert!(err.to_string().contains("strike"));
    }

    #[test]
    fn test_estimate_error_display() {
        let err = EstimateError::NoEnginesAvailable { failed: 10 };
        assert_eq!(err.to_string(), "No engine produced a price (10 failed)");
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = EstimateError::Scenario(ScenarioError::InvalidSpot { spot: 0.0 }).into();
        assert!(matches!(err, PricingError::InvalidInput(_)));

        let err: PricingError = EngineError::NonFinite { engine: "Binomial Tian" }.into();
        assert!(matches!(err, PricingError::ModelFailure(_)));

        let err = EngineError::AboveUpperBound {
            engine: "Additive equiprobabilities",
            price: 97.18,
            bound: 20.0,
        };
        assert_eq!(
            err.to_string(),
            "Additive equiprobabilities price 97.18 exceeds the upper bound 20"
        );
        assert!(matches!(PricingError::from(err), PricingError::ModelFailure(_)));
    }
}
