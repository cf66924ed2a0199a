//! Core time and option types.
//!
//! This module provides:
//! - `time`: Date and DayCountConvention
//! - `option_kind`: Call/put right with intrinsic value
//! - `error`: Structured error types for pricing, date, interpolation, and solver operations
//!
//! # Re-exports
//!
//! - [`Date`], [`DayCountConvention`] from `time`
//! - [`OptionKind`] from `option_kind`
//! - [`PricingError`], [`DateError`], [`InterpolationError`], [`SolverError`] from `error`

pub mod error;
pub mod option_kind;
pub mod time;

pub use error::{DateError, InterpolationError, PricingError, SolverError};
pub use option_kind::OptionKind;
pub use time::{Date, DayCountConvention};
