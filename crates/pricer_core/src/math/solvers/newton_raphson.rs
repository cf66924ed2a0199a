//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)`.
///
/// Converges quadratically near a simple root but may fail if the
/// derivative vanishes or the seed is far from the root. Iterates can be
/// confined to a bracket with [`find_root_bounded`](Self::find_root_bounded),
/// which is how critical exercise prices are kept strictly positive.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 (find √2)
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Errors
    ///
    /// * `SolverError::MaxIterationsExceeded` - failed to converge
    /// * `SolverError::DerivativeNearZero` - derivative too small
    /// * `SolverError::NumericalInstability` - an iterate became non-finite
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.find_root_bounded(|x| (f(x), f_prime(x)), x0, T::neg_infinity(), T::infinity())
    }

    /// Find a root of a function returning `(f(x), f'(x))` in one call,
    /// clamping every iterate into `[lower, upper]`.
    ///
    /// Useful when value and slope share expensive intermediate terms.
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    /// // ln(x) = 0 with a seed that would overshoot below zero without the floor
    /// let root = solver
    ///     .find_root_bounded(|x: f64| (x.ln(), 1.0 / x), 3.0, 1e-8, f64::INFINITY)
    ///     .unwrap();
    /// assert!((root - 1.0).abs() < 1e-10);
    /// ```
    pub fn find_root_bounded<F>(&self, fdf: F, x0: T, lower: T, upper: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> (T, T),
    {
        let mut x = x0.max(lower).min(upper);
        let epsilon = T::min_positive_value().sqrt();

        for _iteration in 0..self.config.max_iterations {
            let (f_val, f_prime_val) = fdf(x);

            if !f_val.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }

            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            if !(f_prime_val.abs() > epsilon) {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            x = (x - f_val / f_prime_val).max(lower).min(upper);

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
