//! # pricer_core: Foundation types for the American option pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricer stack, providing:
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Option right: `OptionKind` (`types::option_kind`)
//! - Error types: `PricingError`, `DateError`, `InterpolationError`, `SolverError` (`types::error`)
//! - Flat, date-anchored market data: `FlatCurve`, `FlatVol` (`market_data`)
//! - Numerics: Newton-Raphson, Thomas tridiagonal solver, linear interpolation (`math`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::{FlatCurve, YieldCurve};
//! use pricer_core::types::{Date, DayCountConvention, OptionKind};
//!
//! let valuation = Date::from_ymd(2021, 10, 6).unwrap().add_days(5).unwrap();
//! let exercise = Date::from_ymd(2021, 11, 19).unwrap();
//!
//! let rates = FlatCurve::new(0.0152_f64, valuation, DayCountConvention::Actual365Fixed);
//! let df = rates.discount_to(exercise).unwrap();
//! assert!(df < 1.0);
//!
//! let kind: OptionKind = "put".parse().unwrap();
//! assert!((kind.intrinsic(16.275_f64, 20.0) - 3.725).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, DayCountConvention, OptionKind

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
