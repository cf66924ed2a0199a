//! Closed-form American approximations as engines.

use pricer_models::analytical::{BaroneAdesiWhaley, BjerksundStensland};
use pricer_models::instruments::AmericanOption;
use pricer_models::MarketModel;

use super::Priceable;
use crate::error::EngineError;

/// Which approximation an [`AnalyticEngine`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AnalyticMethod {
    /// Barone-Adesi-Whaley (1987) quadratic approximation
    BaroneAdesiWhaley,
    /// Bjerksund-Stensland (1993) flat boundary
    BjerksundStensland,
}

/// Engine wrapping one of the analytic approximations.
///
/// # Examples
/// ```
/// use pricer_pricing::engines::{AnalyticEngine, AnalyticMethod, Priceable};
///
/// let engine = AnalyticEngine::new(AnalyticMethod::BjerksundStensland);
/// assert_eq!(engine.name(), "Bjerksund-Stensland");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyticEngine {
    method: AnalyticMethod,
}

impl AnalyticEngine {
    /// Creates the engine.
    pub fn new(method: AnalyticMethod) -> Self {
        Self { method }
    }

    /// The approximation used.
    pub fn method(&self) -> AnalyticMethod {
        self.method
    }
}

impl Priceable for AnalyticEngine {
    fn name(&self) -> &'static str {
        match self.method {
            AnalyticMethod::BaroneAdesiWhaley => "Barone-Adesi-Whaley",
            AnalyticMethod::BjerksundStensland => "Bjerksund-Stensland",
        }
    }

    fn price(&self, market: &MarketModel, option: &AmericanOption) -> Result<f64, EngineError> {
        let model = market.black_scholes()?;
        let expiry = market.time_to_expiry();

        let price = match self.method {
            AnalyticMethod::BaroneAdesiWhaley => {
                BaroneAdesiWhaley::from_model(model).price(option.kind(), option.strike(), expiry)?
            }
            AnalyticMethod::BjerksundStensland => {
                BjerksundStensland::from_model(model).price(option.kind(), option.strike(), expiry)?
            }
        };

        if price.is_finite() {
            Ok(price)
        } else {
            Err(EngineError::NonFinite { engine: self.name() })
        }
    }
}
