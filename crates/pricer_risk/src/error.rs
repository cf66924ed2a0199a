//! Sensitivity table error types.
//!
//! Only grid configuration and thread pool construction are fatal. A cell
//! whose evaluation fails is recorded as empty and never surfaces here.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Requested totals fall outside the step bands.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GridConfigurationError {
    /// Holding period above the last band and not a whole number of weeks.
    #[error("No days step for {days} days (max 200 unless a multiple of 7)")]
    DaysOutOfRange {
        /// Requested holding days
        days: u32,
    },

    /// Spot move magnitude above the last band.
    #[error("No move step for {percent}% (max 100%)")]
    MoveOutOfRange {
        /// Rounded move magnitude in percent
        percent: u64,
    },

    /// Spot move fraction is NaN or infinite.
    #[error("Spot move fraction must be finite, got {fraction}")]
    NonFiniteMove {
        /// Offending fraction
        fraction: f64,
    },
}

/// Failure to build a sensitivity table.
///
/// # Examples
/// ```
/// use pricer_risk::{GridConfigurationError, TableError};
///
/// let err: TableError = GridConfigurationError::DaysOutOfRange { days: 201 }.into();
/// assert!(err.to_string().contains("201 days"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    /// Axes cannot be generated.
    #[error("Grid configuration error: {0}")]
    GridConfiguration(#[from] GridConfigurationError),

    /// Worker pool could not be started.
    #[error("Thread pool error: {message}")]
    ThreadPool {
        /// Builder error message
        message: String,
    },
}

impl From<rayon::ThreadPoolBuildError> for TableError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        TableError::ThreadPool {
            message: err.to_string(),
        }
    }
}

impl From<TableError> for PricingError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::GridConfiguration(_) => PricingError::InvalidInput(err.to_string()),
            TableError::ThreadPool { .. } => PricingError::ModelFailure(err.to_string()),
        }
    }
}
