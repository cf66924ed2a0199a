//! Scenario → market → engines → estimate.

use pricer_models::{MarketModel, ScenarioParameters};
use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::aggregate::{aggregate, PriceEstimate};
use crate::engines::{EngineSet, Priceable, PricingEngine};
use crate::error::{EngineError, EstimateError};

/// Pipeline execution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PipelineConfig {
    /// Run the engines of one evaluation on the rayon pool
    pub parallel_engines: bool,
}

/// Evaluates one scenario with every engine of an [`EngineSet`].
///
/// The pipeline holds no per-evaluation state and can be shared across
/// threads.
///
/// # Examples
/// ```
/// use pricer_core::types::{Date, OptionKind};
/// use pricer_models::ScenarioParameters;
/// use pricer_pricing::PricingPipeline;
///
/// let scenario = ScenarioParameters::builder()
///     .option_kind(OptionKind::Put)
///     .spot_price(15.50)
///     .strike_price(20.0)
///     .volatility(0.5815)
///     .risk_free_rate(0.0152)
///     .dividend_rate(0.0135)
///     .valuation_date(Date::from_ymd(2021, 10, 6).unwrap())
///     .exercise_date(Date::from_ymd(2021, 11, 19).unwrap())
///     .days_held(5)
///     .spot_move_fraction(0.05)
///     .build()
///     .unwrap();
///
/// let estimate = PricingPipeline::default().evaluate(&scenario).unwrap();
/// assert_eq!(estimate.rounded(), 3.96);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PricingPipeline {
    engines: EngineSet,
    config: PipelineConfig,
}

impl PricingPipeline {
    /// Pipeline over `engines`, engines run sequentially.
    pub fn new(engines: EngineSet) -> Self {
        Self {
            engines,
            config: PipelineConfig::default(),
        }
    }

    /// Replaces the execution settings.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Engines in evaluation order.
    #[inline]
    pub fn engines(&self) -> &EngineSet {
        &self.engines
    }

    /// Execution settings.
    #[inline]
    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    /// Builds the market for `scenario` and prices it with every engine.
    ///
    /// # Errors
    /// - `EstimateError::Scenario` if the scenario is rejected
    /// - `EstimateError::NoEnginesAvailable` if every engine fails
    pub fn evaluate(&self, scenario: &ScenarioParameters) -> Result<PriceEstimate, EstimateError> {
        let market = MarketModel::from_scenario(scenario)?;
        self.evaluate_market(&market, scenario)
    }

    /// Prices against an already built market.
    ///
    /// # Errors
    /// `EstimateError::NoEnginesAvailable` if every engine fails.
    pub fn evaluate_market(
        &self,
        market: &MarketModel,
        scenario: &ScenarioParameters,
    ) -> Result<PriceEstimate, EstimateError> {
        let span = debug_span!(
            "evaluate",
            kind = %scenario.option_kind,
            spot = market.effective_spot(),
            days_held = scenario.days_held,
        );
        let _guard = span.enter();

        let option = market.american_option(scenario.option_kind, scenario.strike_price);
        let run = |engine: &PricingEngine| -> (&'static str, Result<f64, EngineError>) {
            (engine.name(), engine.price(market, &option))
        };

        let outcomes: Vec<_> = if self.config.parallel_engines {
            self.engines.as_slice().par_iter().map(run).collect()
        } else {
            self.engines.iter().map(run).collect()
        };

        let estimate = aggregate(outcomes)?;
        debug!(
            price = estimate.price(),
            engines = estimate.results().len(),
            failed = estimate.failures().len(),
            "evaluation complete"
        );
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::BinomialScheme;
    use pricer_core::types::{Date, OptionKind};
    use pricer_models::ScenarioError;

    fn sample() -> ScenarioParameters {
        ScenarioParameters::builder()
            .option_kind(OptionKind::Put)
            .spot_price(15.50)
            .strike_price(20.0)
            .volatility(0.5815)
            .risk_free_rate(0.0152)
            .dividend_rate(0.0135)
            .valuation_date(Date::from_ymd(2021, 10, 6).unwrap())
            .exercise_date(Date::from_ymd(2021, 11, 19).unwrap())
            .days_held(5)
            .spot_move_fraction(0.05)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let engines = EngineSet::from(vec![
            PricingEngine::barone_adesi_whaley(),
            PricingEngine::binomial(BinomialScheme::CoxRossRubinstein),
        ]);
        let sequential = PricingPipeline::new(engines.clone()).evaluate(&sample()).unwrap();
        let parallel = PricingPipeline::new(engines)
            .with_config(PipelineConfig { parallel_engines: true })
            .evaluate(&sample())
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_results_keep_engine_order() {
        let estimate = PricingPipeline::default().evaluate(&sample()).unwrap();
        let names: Vec<_> = estimate.results().iter().map(|r| r.engine.as_str()).collect();
        assert_eq!(names, EngineSet::default().names());
    }

    #[test]
    fn test_invalid_scenario_is_fatal() {
        let mut scenario = sample();
        scenario.days_held = 60;
        let err = PricingPipeline::default().evaluate(&scenario).unwrap_err();
        assert!(matches!(
            err,
            EstimateError::Scenario(ScenarioError::ExerciseNotAfterValuation { .. })
        ));
    }

    #[test]
    fn test_empty_engine_set() {
        let pipeline = PricingPipeline::new(EngineSet::new(Vec::new()));
        assert_eq!(
            pipeline.evaluate(&sample()).unwrap_err(),
            EstimateError::NoEnginesAvailable { failed: 0 }
        );
    }
}
