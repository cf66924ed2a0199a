//! # Pricer Models (L2: Business Logic)
//!
//! Scenario inputs, the derived market model and closed-form American
//! option approximations.
//!
//! This crate provides:
//! - [`scenario::ScenarioParameters`]: the validated input contract of one valuation
//! - [`market::MarketModel`]: effective spot, shifted valuation date and flat curves
//! - [`instruments::AmericanOption`]: option terms and exercise window
//! - [`analytical`]: Black-Scholes-Merton, Barone-Adesi-Whaley and
//!   Bjerksund-Stensland
//!
//! ## Design Principles
//!
//! - **Immutable scenarios**: variants are copies, never mutations
//! - **Builder pattern** for ergonomic construction with validation at `build()`
//! - **Generic analytics** over `T: Float`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod error;
pub mod instruments;
pub mod market;
pub mod scenario;

pub use error::ScenarioError;
pub use market::MarketModel;
pub use scenario::{ScenarioBuilder, ScenarioParameters};
