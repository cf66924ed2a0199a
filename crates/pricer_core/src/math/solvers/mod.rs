//! Root-finding and linear solvers.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: quadratic convergence using derivatives, used
//!   to locate critical exercise prices
//! - [`TridiagonalSolver`]: Thomas algorithm for implicit finite-difference steps
//!
//! Root finders are configured with [`SolverConfig`]:
//! - `tolerance`: Convergence tolerance on |f(x)| (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, |x| 2.0 * x, 1.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod config;
mod newton_raphson;
mod tridiagonal;

pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
pub use tridiagonal::TridiagonalSolver;
