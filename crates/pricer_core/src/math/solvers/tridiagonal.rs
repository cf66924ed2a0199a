//! Tridiagonal linear solver (Thomas algorithm).

use crate::types::SolverError;
use num_traits::Float;

/// Solver for `A x = d` where `A` is tridiagonal.
///
/// Row `i` reads `lower[i] * x[i-1] + diag[i] * x[i] + upper[i] * x[i+1] = d[i]`;
/// `lower[0]` and `upper[n-1]` are ignored. Scratch buffers are kept between
/// calls so a time-stepping loop solves without reallocating.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::TridiagonalSolver;
///
/// // [2 1 0; 1 2 1; 0 1 2] x = [4, 8, 8]  =>  x = [1, 2, 3]
/// let mut solver = TridiagonalSolver::new(3);
/// let mut x = vec![0.0_f64; 3];
/// solver
///     .solve(&[0.0, 1.0, 1.0], &[2.0, 2.0, 2.0], &[1.0, 1.0, 0.0], &[4.0, 8.0, 8.0], &mut x)
///     .unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((x[2] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TridiagonalSolver<T: Float> {
    c_prime: Vec<T>,
    d_prime: Vec<T>,
}

impl<T: Float> TridiagonalSolver<T> {
    /// Create a solver for systems of dimension `n`.
    pub fn new(n: usize) -> Self {
        Self {
            c_prime: vec![T::zero(); n],
            d_prime: vec![T::zero(); n],
        }
    }

    /// System dimension.
    pub fn len(&self) -> usize {
        self.c_prime.len()
    }

    /// True for a zero-dimensional solver.
    pub fn is_empty(&self) -> bool {
        self.c_prime.is_empty()
    }

    /// Solve the system, writing the solution into `x`.
    ///
    /// # Errors
    ///
    /// * `SolverError::DimensionMismatch` - any slice length differs from `len()`
    /// * `SolverError::SingularMatrix` - a pivot vanished during elimination
    pub fn solve(
        &mut self,
        lower: &[T],
        diag: &[T],
        upper: &[T],
        rhs: &[T],
        x: &mut [T],
    ) -> Result<(), SolverError> {
        let n = self.len();
        for len in [lower.len(), diag.len(), upper.len(), rhs.len(), x.len()] {
            if len != n {
                return Err(SolverError::DimensionMismatch {
                    expected: n,
                    got: len,
                });
            }
        }
        if n == 0 {
            return Ok(());
        }

        let tiny = T::min_positive_value();

        if diag[0].abs() <= tiny {
            return Err(SolverError::SingularMatrix { row: 0 });
        }
        self.c_prime[0] = upper[0] / diag[0];
        self.d_prime[0] = rhs[0] / diag[0];

        for i in 1..n {
            let pivot = diag[i] - lower[i] * self.c_prime[i - 1];
            if pivot.abs() <= tiny || !pivot.is_finite() {
                return Err(SolverError::SingularMatrix { row: i });
            }
            self.c_prime[i] = if i + 1 < n {
                upper[i] / pivot
            } else {
                T::zero()
            };
            self.d_prime[i] = (rhs[i] - lower[i] * self.d_prime[i - 1]) / pivot;
        }

        x[n - 1] = self.d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = self.d_prime[i] - self.c_prime[i] * x[i + 1];
        }
        Ok(())
    }
}
