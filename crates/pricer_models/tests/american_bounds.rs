//! Integration tests for the closed-form American approximations.
//!
//! Checks no-arbitrage bounds and the relationship between the two
//! approximations across a range of markets.

use pricer_core::types::OptionKind;
use pricer_models::analytical::{BaroneAdesiWhaley, BjerksundStensland, BlackScholes};
use pricer_models::{MarketModel, ScenarioParameters};
use proptest::prelude::*;

// ==========================================================
// Agreement between approximations
// ==========================================================

#[test]
fn test_approximations_agree_on_sample_put() {
    let bs = BlackScholes::new(16.275_f64, 0.0152, 0.0135, 0.5815).unwrap();
    let expiry = 39.0 / 365.0;
    let baw = BaroneAdesiWhaley::from_model(bs.clone())
        .price(OptionKind::Put, 20.0, expiry)
        .unwrap();
    let bjs = BjerksundStensland::from_model(bs.clone())
        .price(OptionKind::Put, 20.0, expiry)
        .unwrap();

    assert!((baw - 3.95952).abs() < 1e-4, "BAW = {baw}");
    assert!((baw - bjs).abs() / baw < 0.02);
    assert!(baw < 20.0 && bjs < 20.0);
}

#[test]
fn test_market_model_feeds_approximations() {
    let scenario = ScenarioParameters::builder()
        .option_kind(OptionKind::Call)
        .spot_price(100.0)
        .strike_price(100.0)
        .volatility(0.25)
        .risk_free_rate(0.10)
        .dividend_rate(0.10)
        .valuation_date(pricer_core::types::Date::from_ymd(2023, 1, 1).unwrap())
        .exercise_date(pricer_core::types::Date::from_ymd(2023, 7, 2).unwrap())
        .build()
        .unwrap();
    let market = MarketModel::from_scenario(&scenario).unwrap();
    let baw = BaroneAdesiWhaley::from_model(market.black_scholes().unwrap());

    // 182 days ≈ 0.4986y; Haug's T=0.5 value is 6.8015
    let price = baw
        .price(OptionKind::Call, 100.0, market.time_to_expiry())
        .unwrap();
    assert!((price - 6.8015).abs() < 0.05, "price = {price}");
}

// ==========================================================
// No-arbitrage bounds
// ==========================================================

proptest! {
    #[test]
    fn prop_american_bounds(
        spot in 60.0f64..140.0,
        rate in 0.0f64..0.12,
        dividend in 0.0f64..0.12,
        vol in 0.1f64..0.6,
        expiry in 0.05f64..2.0,
        is_call in any::<bool>(),
    ) {
        let kind = if is_call { OptionKind::Call } else { OptionKind::Put };
        let strike = 100.0;
        let bs = BlackScholes::new(spot, rate, dividend, vol).unwrap();
        let european = bs.price(kind, strike, expiry);
        let intrinsic = kind.intrinsic(spot, strike);

        let baw = BaroneAdesiWhaley::from_model(bs.clone()).price(kind, strike, expiry).unwrap();
        let bjs = BjerksundStensland::from_model(bs).price(kind, strike, expiry).unwrap();

        prop_assert!(european >= 0.0);
        prop_assert!(baw >= european - 1e-9);
        prop_assert!(bjs >= european - 1e-9);
        prop_assert!(baw >= intrinsic - 1e-9);
        prop_assert!(bjs >= intrinsic - 1e-9);
    }

    #[test]
    fn prop_put_decreasing_in_spot(spot in 70.0f64..130.0, bump in 0.5f64..5.0) {
        let low = BaroneAdesiWhaley::new(spot, 0.08, 0.02, 0.3).unwrap();
        let high = BaroneAdesiWhaley::new(spot + bump, 0.08, 0.02, 0.3).unwrap();
        let p_low = low.price(OptionKind::Put, 100.0, 1.0).unwrap();
        let p_high = high.price(OptionKind::Put, 100.0, 1.0).unwrap();
        prop_assert!(p_high <= p_low + 1e-9);
    }
}
