//! Integration tests: agreement between engine families and end-to-end
//! properties of the pricing pipeline.

use pricer_core::types::{Date, OptionKind};
use pricer_models::{MarketModel, ScenarioParameters};
use pricer_pricing::engines::{
    AnalyticEngine, AnalyticMethod, BinomialEngine, BinomialScheme, FiniteDifferenceEngine,
};
use pricer_pricing::{EngineSet, Priceable, PricingEngine, PricingPipeline};
use proptest::prelude::*;

fn one_year_scenario(kind: OptionKind, spot: f64, strike: f64, rate: f64, dividend: f64, vol: f64) -> ScenarioParameters {
    ScenarioParameters::builder()
        .option_kind(kind)
        .spot_price(spot)
        .strike_price(strike)
        .volatility(vol)
        .risk_free_rate(rate)
        .dividend_rate(dividend)
        .valuation_date(Date::from_ymd(2023, 1, 1).unwrap())
        .exercise_date(Date::from_ymd(2024, 1, 1).unwrap())
        .build()
        .unwrap()
}

fn sample_scenario() -> ScenarioParameters {
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

/// Cheap engine set for property tests.
fn coarse_engines() -> EngineSet {
    let mut engines = vec![
        PricingEngine::barone_adesi_whaley(),
        PricingEngine::bjerksund_stensland(),
        PricingEngine::FiniteDifference(FiniteDifferenceEngine::new(101, 100).unwrap()),
    ];
    engines.extend(
        BinomialScheme::ALL
            .iter()
            .map(|&s| PricingEngine::Binomial(BinomialEngine::new(s, 101))),
    );
    EngineSet::new(engines)
}

// ==========================================================
// Convergence between families
// ==========================================================

#[test]
fn test_binomial_schemes_agree_within_one_percent() {
    let scenario = one_year_scenario(OptionKind::Put, 36.0, 40.0, 0.06, 0.0, 0.2);
    let market = MarketModel::from_scenario(&scenario).unwrap();
    let option = market.american_option(OptionKind::Put, 40.0);

    let prices: Vec<f64> = BinomialScheme::ALL
        .iter()
        .map(|&s| BinomialEngine::new(s, 801).price(&market, &option).unwrap())
        .collect();
    let lo = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!((hi - lo) / lo < 0.01, "tree spread {lo}..{hi}");

    // Published American value for this put is 4.4867
    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    assert!((mean - 4.4867).abs() < 0.01, "mean = {mean}");

    let fd = FiniteDifferenceEngine::default().price(&market, &option).unwrap();
    assert!((fd - mean).abs() / mean < 0.02, "fd = {fd}");
}

#[test]
fn test_analytic_approximations_agree_within_two_percent() {
    for (kind, spot, dividend) in [
        (OptionKind::Put, 36.0, 0.0),
        (OptionKind::Call, 42.0, 0.08),
        (OptionKind::Put, 40.0, 0.02),
    ] {
        let scenario = one_year_scenario(kind, spot, 40.0, 0.06, dividend, 0.3);
        let market = MarketModel::from_scenario(&scenario).unwrap();
        let option = market.american_option(kind, 40.0);

        let baw = AnalyticEngine::new(AnalyticMethod::BaroneAdesiWhaley)
            .price(&market, &option)
            .unwrap();
        let bjs = AnalyticEngine::new(AnalyticMethod::BjerksundStensland)
            .price(&market, &option)
            .unwrap();
        assert!((baw - bjs).abs() / baw < 0.02, "{kind} S={spot}: {baw} vs {bjs}");
    }
}

#[test]
fn test_call_family_agreement_with_dividends() {
    // S=100, K=100, r=q=10%, σ=25%: trees ≈ 6.77, BAW ≈ 6.79
    let scenario = ScenarioParameters::builder()
        .option_kind(OptionKind::Call)
        .spot_price(100.0)
        .strike_price(100.0)
        .volatility(0.25)
        .risk_free_rate(0.10)
        .dividend_rate(0.10)
        .valuation_date(Date::from_ymd(2023, 1, 1).unwrap())
        .exercise_date(Date::from_ymd(2023, 7, 2).unwrap())
        .build()
        .unwrap();
    let estimate = PricingPipeline::default().evaluate(&scenario).unwrap();

    assert!(estimate.failures().is_empty());
    for result in estimate.results() {
        assert!(
            (result.price - estimate.price()).abs() / estimate.price() < 0.02,
            "{} = {}",
            result.engine,
            result.price
        );
    }
}

// ==========================================================
// End to end
// ==========================================================

#[test]
fn test_sample_scenario_end_to_end() {
    let scenario = sample_scenario();
    assert!((scenario.effective_spot() - 16.275).abs() < 1e-12);

    let estimate = PricingPipeline::default().evaluate(&scenario).unwrap();
    assert_eq!(estimate.results().len(), 10);
    assert!(estimate.failures().is_empty());
    assert!(estimate.price() > 0.0 && estimate.price() < 20.0);
    assert_eq!(estimate.rounded(), 3.96);

    let (lo, hi) = estimate.range();
    assert!(lo <= estimate.price() && estimate.price() <= hi);
}

#[test]
fn test_evaluation_is_reproducible() {
    let scenario = sample_scenario();
    let pipeline = PricingPipeline::default();
    let first = pipeline.evaluate(&scenario).unwrap();
    let second = pipeline.evaluate(&scenario).unwrap();
    assert_eq!(first.price().to_bits(), second.price().to_bits());
    assert_eq!(first, second);
}

#[test]
fn test_failing_engine_is_excluded() {
    // Zero-step tree fails, the rest still price
    let engines = EngineSet::new(vec![
        PricingEngine::barone_adesi_whaley(),
        PricingEngine::Binomial(BinomialEngine::new(BinomialScheme::Tian, 0)),
    ]);
    let estimate = PricingPipeline::new(engines).evaluate(&sample_scenario()).unwrap();
    assert_eq!(estimate.results().len(), 1);
    assert_eq!(estimate.failures().len(), 1);
    assert_eq!(estimate.failures()[0].engine, "Binomial Tian");
}

#[test]
fn test_price_above_spot_is_excluded() {
    // At σ = 200% over ten years the additive tree's call overshoots the spot
    let scenario = ScenarioParameters::builder()
        .option_kind(OptionKind::Call)
        .spot_price(20.0)
        .strike_price(20.0)
        .volatility(2.0)
        .risk_free_rate(0.05)
        .dividend_rate(0.0)
        .valuation_date(Date::from_ymd(2023, 1, 1).unwrap())
        .exercise_date(Date::from_ymd(2033, 1, 1).unwrap())
        .build()
        .unwrap();
    let estimate = PricingPipeline::default().evaluate(&scenario).unwrap();

    let failure = estimate
        .failures()
        .iter()
        .find(|f| f.engine == "Additive equiprobabilities")
        .expect("additive tree should be rejected");
    assert!(failure.reason.contains("exceeds the upper bound 20"), "{}", failure.reason);

    assert!(!estimate.results().is_empty());
    assert!(estimate.results().iter().all(|r| r.price <= 20.0 + 1e-6));
    assert!(estimate.price() <= 20.0);
}

// ==========================================================
// Monotonicity in spot
// ==========================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn prop_estimate_monotone_in_spot(
        spot in 70.0f64..130.0,
        bump in 0.02f64..0.2,
        vol in 0.2f64..0.5,
        rate in 0.0f64..0.08,
        dividend in 0.0f64..0.08,
        is_call in any::<bool>(),
    ) {
        let kind = if is_call { OptionKind::Call } else { OptionKind::Put };
        let pipeline = PricingPipeline::new(coarse_engines());

        let low = one_year_scenario(kind, spot, 100.0, rate, dividend, vol);
        let high = one_year_scenario(kind, spot * (1.0 + bump), 100.0, rate, dividend, vol);
        let v_low = pipeline.evaluate(&low).unwrap().price();
        let v_high = pipeline.evaluate(&high).unwrap().price();

        match kind {
            OptionKind::Call => prop_assert!(v_high >= v_low - 1e-6, "{v_low} -> {v_high}"),
            OptionKind::Put => prop_assert!(v_high <= v_low + 1e-6, "{v_low} -> {v_high}"),
        }
    }
}
