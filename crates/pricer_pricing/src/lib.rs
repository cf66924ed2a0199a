//! # Pricer Engines (Layer 3: Valuation)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns a scenario into a price by running several
//! independent valuation algorithms over the same market and averaging them:
//! - Closed-form approximations: Barone-Adesi-Whaley, Bjerksund-Stensland
//! - Finite differences: Crank-Nicolson on log-spot with Rannacher start-up
//! - Binomial trees: Jarrow-Rudd, Cox-Ross-Rubinstein, additive
//!   equiprobabilities, Trigeorgis, Tian, Leisen-Reimer, Joshi
//!
//! Engines that fail are dropped from the mean and reported in the
//! [`PriceEstimate`]; the evaluation only fails if the scenario is invalid or
//! no engine produced a price.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{Date, OptionKind};
//! use pricer_models::ScenarioParameters;
//! use pricer_pricing::{EngineSet, PricingPipeline};
//!
//! let scenario = ScenarioParameters::builder()
//!     .option_kind(OptionKind::Call)
//!     .spot_price(100.0)
//!     .strike_price(100.0)
//!     .volatility(0.25)
//!     .risk_free_rate(0.10)
//!     .dividend_rate(0.10)
//!     .valuation_date(Date::from_ymd(2024, 1, 1).unwrap())
//!     .exercise_date(Date::from_ymd(2024, 7, 1).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let pipeline = PricingPipeline::new(EngineSet::default());
//! let estimate = pipeline.evaluate(&scenario).unwrap();
//! assert_eq!(estimate.results().len(), 10);
//! assert!((estimate.price() - 6.79).abs() < 0.05);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisable engine configuration and estimates

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod aggregate;
pub mod engines;
pub mod error;
pub mod pipeline;

pub use aggregate::{EngineFailure, EngineResult, PriceEstimate};
pub use engines::{EngineSet, Priceable, PricingEngine};
pub use error::{EngineError, EstimateError};
pub use pipeline::{PipelineConfig, PricingPipeline};
