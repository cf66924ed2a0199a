//! Rate curve abstractions.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`FlatCurve`]: Constant rate curve anchored at a reference date

mod flat;
mod traits;

pub use flat::FlatCurve;
pub use traits::YieldCurve;
