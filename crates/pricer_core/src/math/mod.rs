//! Numerical building blocks shared by the pricing engines.
//!
//! - [`solvers`]: scalar root finding (Newton-Raphson) and the tridiagonal
//!   linear solver used by finite-difference schemes
//! - [`interpolators`]: 1D linear interpolation on sorted abscissae

pub mod interpolators;
pub mod solvers;
