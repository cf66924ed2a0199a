//! Interpolation methods.
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points
//! - [`Interpolator`]: `interpolate(x)` and `domain()` contract
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//! assert!((interp.interpolate(1.5).unwrap() - 2.5).abs() < 1e-10);
//! ```

mod linear;
mod traits;

pub use linear::LinearInterpolator;
pub use traits::Interpolator;
