//! Volatility surface abstractions.
//!
//! This module provides:
//! - [`VolatilitySurface`]: Generic trait for volatility lookup
//! - [`FlatVol`]: Constant volatility surface

mod flat;
mod traits;

pub use flat::FlatVol;
pub use traits::VolatilitySurface;
