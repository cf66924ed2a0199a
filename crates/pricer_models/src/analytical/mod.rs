//! Closed-form and quasi-analytical option pricing.
//!
//! This module provides:
//! - Black-Scholes-Merton for European options with a continuous yield
//! - Barone-Adesi-Whaley quadratic approximation for American options
//! - Bjerksund-Stensland (1993) flat-boundary approximation for American options
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: `f32` and `f64` share one implementation
//! - **Double precision CDF**: the Hart algorithm keeps the approximations
//!   accurate well into the tails

pub mod barone_adesi_whaley;
pub mod bjerksund_stensland;
pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use barone_adesi_whaley::BaroneAdesiWhaley;
pub use bjerksund_stensland::BjerksundStensland;
pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
