//! Risk-neutral market model derived from a scenario.
//!
//! The model normalises the raw scenario into what every engine consumes:
//! the effective spot after the move, the shifted valuation date, flat
//! rate, dividend and volatility term structures anchored at that date, and
//! the year fraction to expiry.

use pricer_core::market_data::{FlatCurve, FlatVol, VolatilitySurface, YieldCurve};
use pricer_core::types::{Date, DayCountConvention, OptionKind};

use crate::analytical::{AnalyticalError, BlackScholes};
use crate::error::ScenarioError;
use crate::instruments::AmericanOption;
use crate::scenario::ScenarioParameters;

/// Normalised market inputs for one evaluation.
///
/// Built fresh per evaluation and never mutated.
///
/// # Examples
/// ```
/// use pricer_models::market::MarketModel;
/// use pricer_models::scenario::ScenarioParameters;
/// use pricer_core::types::{Date, OptionKind};
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
/// let market = MarketModel::from_scenario(&scenario).unwrap();
/// assert_eq!(market.valuation_date(), Date::from_ymd(2021, 10, 11).unwrap());
/// assert!((market.time_to_expiry() - 39.0 / 365.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct MarketModel {
    valuation_date: Date,
    exercise_date: Date,
    effective_spot: f64,
    risk_free: FlatCurve<f64>,
    dividend: FlatCurve<f64>,
    volatility: FlatVol<f64>,
    day_count: DayCountConvention,
    time_to_expiry: f64,
}

impl MarketModel {
    /// Builds the model for a scenario.
    ///
    /// # Errors
    /// Any [`ScenarioError`] from validation, date shifting or curve
    /// construction.
    pub fn from_scenario(scenario: &ScenarioParameters) -> Result<Self, ScenarioError> {
        scenario.validate()?;

        let valuation_date = scenario.shifted_valuation_date()?;
        let day_count = scenario.day_count;
        let risk_free = FlatCurve::try_new(scenario.risk_free_rate, valuation_date, day_count)?;
        let dividend = FlatCurve::try_new(scenario.dividend_rate, valuation_date, day_count)?;
        let volatility = FlatVol::try_new(scenario.volatility, valuation_date)?;
        let time_to_expiry = risk_free.time_from_reference(scenario.exercise_date)?;

        Ok(Self {
            valuation_date,
            exercise_date: scenario.exercise_date,
            effective_spot: scenario.effective_spot(),
            risk_free,
            dividend,
            volatility,
            day_count,
            time_to_expiry,
        })
    }

    /// Valuation date after the holding period.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Last exercise date.
    #[inline]
    pub fn exercise_date(&self) -> Date {
        self.exercise_date
    }

    /// Spot after the scenario move.
    #[inline]
    pub fn effective_spot(&self) -> f64 {
        self.effective_spot
    }

    /// Flat risk-free curve.
    pub fn risk_free_curve(&self) -> &FlatCurve<f64> {
        &self.risk_free
    }

    /// Flat dividend-yield curve.
    pub fn dividend_curve(&self) -> &FlatCurve<f64> {
        &self.dividend
    }

    /// Flat volatility surface.
    pub fn vol_surface(&self) -> &FlatVol<f64> {
        &self.volatility
    }

    /// Day count used for every year fraction.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Year fraction from valuation to exercise.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Continuously compounded risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.risk_free.rate()
    }

    /// Continuous dividend yield q.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend.rate()
    }

    /// Cost of carry b = r - q.
    #[inline]
    pub fn cost_of_carry(&self) -> f64 {
        self.rate() - self.dividend_yield()
    }

    /// Volatility looked up on the surface for the option's strike and expiry.
    pub fn volatility_for(&self, option: &AmericanOption) -> Result<f64, ScenarioError> {
        Ok(self
            .volatility
            .volatility(option.strike(), self.time_to_expiry)?)
    }

    /// American option on this market's dates, exercisable from the
    /// valuation date through the exercise date.
    pub fn american_option(&self, kind: OptionKind, strike: f64) -> AmericanOption {
        AmericanOption::new(kind, strike, self.valuation_date, self.exercise_date)
    }

    /// European Black-Scholes-Merton model at the effective spot.
    pub fn black_scholes(&self) -> Result<BlackScholes<f64>, AnalyticalError> {
        BlackScholes::new(
            self.effective_spot,
            self.rate(),
            self.dividend_yield(),
            self.volatility.sigma(),
        )
    }
}
