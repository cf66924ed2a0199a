//! Solver configuration types.

use crate::types::SolverError;
use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// // Absolute tolerance scaled to a strike of 20
/// let scaled = SolverConfig::new(20.0 * 1e-6, 200).unwrap();
/// assert_eq!(scaled.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance: the solver stops when `|f(x)| < tolerance`.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// tolerance 1e-10, 100 iterations
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Errors
    ///
    /// `SolverError::NumericalInstability` if `tolerance` is not a positive
    /// finite number or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, SolverError> {
        if !(tolerance.is_finite() && tolerance > T::zero()) {
            return Err(SolverError::NumericalInstability(
                "tolerance must be positive and finite".to_string(),
            ));
        }
        if max_iterations == 0 {
            return Err(SolverError::NumericalInstability(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }
}
