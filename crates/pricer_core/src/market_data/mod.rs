//! Market data structures for option pricing.
//!
//! All structures are generic over `T: Float` and anchored at a
//! reference date, so that a scenario's valuation date shift moves
//! the whole market consistently.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and flat implementation
//! - [`surfaces`]: Volatility surface trait and flat implementation
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
//! use pricer_core::market_data::surfaces::{VolatilitySurface, FlatVol};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let anchor = Date::from_ymd(2024, 1, 2).unwrap();
//! let curve = FlatCurve::new(0.05_f64, anchor, DayCountConvention::Actual365Fixed);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! let vol_surface = FlatVol::new(0.20_f64, anchor);
//! assert_eq!(vol_surface.volatility(100.0, 1.0).unwrap(), 0.20);
//! ```

pub mod curves;
pub mod error;
pub mod surfaces;

pub use curves::{FlatCurve, YieldCurve};
pub use error::MarketDataError;
pub use surfaces::{FlatVol, VolatilitySurface};
