//! Pricing engines for American options.
//!
//! Every engine implements [`Priceable`]. The engines are wrapped in the
//! [`PricingEngine`] enum for static dispatch (no `Box<dyn Priceable>`), and an
//! ordered [`EngineSet`] is what the pipeline iterates.
//!
//! # Engine families
//!
//! - [`analytic`]: Barone-Adesi-Whaley and Bjerksund-Stensland
//! - [`finite_difference`]: Crank-Nicolson with Rannacher start-up on log-spot
//! - [`binomial`]: seven recombining tree schemes
//!
//! # Examples
//!
//! ```
//! use pricer_pricing::engines::EngineSet;
//!
//! let engines = EngineSet::default();
//! assert_eq!(engines.len(), 10);
//! assert_eq!(engines.names()[0], "Barone-Adesi-Whaley");
//! ```

pub mod analytic;
pub mod binomial;
pub mod finite_difference;

pub use analytic::{AnalyticEngine, AnalyticMethod};
pub use binomial::{BinomialEngine, BinomialScheme, Lattice, DEFAULT_TREE_STEPS};
pub use finite_difference::FiniteDifferenceEngine;

use pricer_core::types::OptionKind;
use pricer_models::instruments::AmericanOption;
use pricer_models::MarketModel;

use crate::error::EngineError;

/// Capability shared by every engine: price an American option in a market.
pub trait Priceable {
    /// Display name, e.g. `"Binomial Tian"`.
    fn name(&self) -> &'static str;

    /// Present value of `option` under `market`.
    ///
    /// # Errors
    /// Any [`EngineError`]; the caller excludes this engine from the mean.
    fn price(&self, market: &MarketModel, option: &AmericanOption) -> Result<f64, EngineError>;
}

/// Statically dispatched engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "engine", rename_all = "snake_case")
)]
pub enum PricingEngine {
    /// Closed-form approximation
    Analytic(AnalyticEngine),
    /// PDE solver on a log-spot grid
    FiniteDifference(FiniteDifferenceEngine),
    /// Recombining binomial tree
    Binomial(BinomialEngine),
}

impl PricingEngine {
    /// Barone-Adesi-Whaley engine.
    pub fn barone_adesi_whaley() -> Self {
        Self::Analytic(AnalyticEngine::new(AnalyticMethod::BaroneAdesiWhaley))
    }

    /// Bjerksund-Stensland engine.
    pub fn bjerksund_stensland() -> Self {
        Self::Analytic(AnalyticEngine::new(AnalyticMethod::BjerksundStensland))
    }

    /// Finite-difference engine with default grid.
    pub fn finite_difference() -> Self {
        Self::FiniteDifference(FiniteDifferenceEngine::default())
    }

    /// Binomial engine for `scheme` with the default step count.
    pub fn binomial(scheme: BinomialScheme) -> Self {
        Self::Binomial(BinomialEngine::new(scheme, DEFAULT_TREE_STEPS))
    }
}

impl Priceable for PricingEngine {
    fn name(&self) -> &'static str {
        match self {
            Self::Analytic(engine) => engine.name(),
            Self::FiniteDifference(engine) => engine.name(),
            Self::Binomial(engine) => engine.name(),
        }
    }

    /// Dispatches to the wrapped engine and rejects prices above the
    /// American upper bound (spot for a call, strike for a put).
    fn price(&self, market: &MarketModel, option: &AmericanOption) -> Result<f64, EngineError> {
        let price = match self {
            Self::Analytic(engine) => engine.price(market, option),
            Self::FiniteDifference(engine) => engine.price(market, option),
            Self::Binomial(engine) => engine.price(market, option),
        }?;
        check_upper_bound(self.name(), price, market.effective_spot(), option)
    }
}

/// Relative slack on the upper bound for discretisation noise.
const UPPER_BOUND_TOLERANCE: f64 = 1e-9;

fn check_upper_bound(
    engine: &'static str,
    price: f64,
    spot: f64,
    option: &AmericanOption,
) -> Result<f64, EngineError> {
    let bound = match option.kind() {
        OptionKind::Call => spot,
        OptionKind::Put => option.strike(),
    };
    if price > bound * (1.0 + UPPER_BOUND_TOLERANCE) {
        Err(EngineError::AboveUpperBound { engine, price, bound })
    } else {
        Ok(price)
    }
}

/// Ordered collection of engines evaluated for every scenario.
///
/// The default set holds ten engines: two analytic approximations, the
/// finite-difference solver and the seven binomial schemes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EngineSet(Vec<PricingEngine>);

impl EngineSet {
    /// Wraps an explicit engine list.
    pub fn new(engines: Vec<PricingEngine>) -> Self {
        Self(engines)
    }

    /// Number of engines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Engines in evaluation order.
    pub fn as_slice(&self) -> &[PricingEngine] {
        &self.0
    }

    /// Iterator over engines.
    pub fn iter(&self) -> std::slice::Iter<'_, PricingEngine> {
        self.0.iter()
    }

    /// Engine names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(Priceable::name).collect()
    }
}

impl Default for EngineSet {
    fn default() -> Self {
        let mut engines = vec![
            PricingEngine::barone_adesi_whaley(),
            PricingEngine::bjerksund_stensland(),
            PricingEngine::finite_difference(),
        ];
        engines.extend(BinomialScheme::ALL.iter().map(|&s| PricingEngine::binomial(s)));
        Self(engines)
    }
}

impl From<Vec<PricingEngine>> for EngineSet {
    fn from(engines: Vec<PricingEngine>) -> Self {
        Self(engines)
    }
}

impl<'a> IntoIterator for &'a EngineSet {
    type Item = &'a PricingEngine;
    type IntoIter = std::slice::Iter<'a, PricingEngine>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_order() {
        let names = EngineSet::default().names();
        assert_eq!(
            names,
            vec![
                "Barone-Adesi-Whaley",
                "Bjerksund-Stensland",
                "Finite differences",
                "Binomial Jarrow-Rudd",
                "Binomial Cox-Ross-Rubinstein",
                "Additive equiprobabilities",
                "Binomial Trigeorgis",
                "Binomial Tian",
                "Binomial Leisen-Reimer",
                "Binomial Joshi",
            ]
        );
    }

    #[test]
    fn test_upper_bound_by_kind() {
        use pricer_core::types::Date;

        let start = Date::from_ymd(2024, 1, 2).unwrap();
        let end = Date::from_ymd(2025, 1, 2).unwrap();
        let call = AmericanOption::new(OptionKind::Call, 20.0, start, end);
        let put = AmericanOption::new(OptionKind::Put, 20.0, start, end);

        assert_eq!(check_upper_bound("call", 25.0, 30.0, &call), Ok(25.0));
        assert_eq!(check_upper_bound("call", 30.0, 30.0, &call), Ok(30.0));
        assert_eq!(
            check_upper_bound("call", 97.18, 30.0, &call),
            Err(EngineError::AboveUpperBound {
                engine: "call",
                price: 97.18,
                bound: 30.0
            })
        );
        assert_eq!(check_upper_bound("put", 19.5, 1.0, &put), Ok(19.5));
        assert!(matches!(
            check_upper_bound("put", 20.5, 1.0, &put),
            Err(EngineError::AboveUpperBound { bound, .. }) if bound == 20.0
        ));
    }

    #[test]
    fn test_custom_set() {
        let set = EngineSet::from(vec![PricingEngine::barone_adesi_whaley()]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert!(EngineSet::new(Vec::new()).is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_engine_serde_tags() {
        let json = r#"[
            {"engine": "analytic", "method": "bjerksund_stensland"},
            {"engine": "binomial", "scheme": "tian", "steps": 101},
            {"engine": "finite_difference"}
        ]"#;
        let set: EngineSet = serde_json::from_str(json).unwrap();
        assert_eq!(
            set.names(),
            vec!["Bjerksund-Stensland", "Binomial Tian", "Finite differences"]
        );
        assert_eq!(
            set.as_slice()[1],
            PricingEngine::Binomial(BinomialEngine::new(BinomialScheme::Tian, 101))
        );
    }
}
