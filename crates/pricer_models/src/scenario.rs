//! Scenario parameters: the input contract of a single valuation.
//!
//! A [`ScenarioParameters`] value is immutable once built. Variants for the
//! sensitivity grid are produced with [`ScenarioParameters::with_days_held`]
//! and [`ScenarioParameters::with_spot_move`], which return modified copies.

use pricer_core::types::{Date, DayCountConvention, OptionKind};

use crate::error::ScenarioError;

/// Raw inputs for one American option valuation.
///
/// # Examples
/// ```
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
/// assert!((scenario.effective_spot() - 16.275).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioParameters {
    /// Call or put
    pub option_kind: OptionKind,
    /// Current underlying price
    pub spot_price: f64,
    /// Strike price
    pub strike_price: f64,
    /// Annualised volatility (flat)
    pub volatility: f64,
    /// Continuously compounded risk-free rate (flat)
    pub risk_free_rate: f64,
    /// Continuous dividend yield (flat)
    pub dividend_rate: f64,
    /// Date the scenario is observed
    pub valuation_date: Date,
    /// Last exercise date
    pub exercise_date: Date,
    /// Calendar days the position is held before valuation
    #[cfg_attr(feature = "serde", serde(default))]
    pub days_held: u32,
    /// Relative spot move applied at the end of the holding period
    #[cfg_attr(feature = "serde", serde(default))]
    pub spot_move_fraction: f64,
    /// Year fraction convention for time to expiry
    #[cfg_attr(feature = "serde", serde(default))]
    pub day_count: DayCountConvention,
}

impl ScenarioParameters {
    /// Starts a builder.
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::new()
    }

    /// Copy with a different holding period.
    pub fn with_days_held(&self, days_held: u32) -> Self {
        Self {
            days_held,
            ..self.clone()
        }
    }

    /// Copy with a different relative spot move.
    pub fn with_spot_move(&self, spot_move_fraction: f64) -> Self {
        Self {
            spot_move_fraction,
            ..self.clone()
        }
    }

    /// Spot after applying the move: `S × (1 + f)`.
    #[inline]
    pub fn effective_spot(&self) -> f64 {
        self.spot_price * (1.0 + self.spot_move_fraction)
    }

    /// Valuation date shifted forward by the holding period.
    pub fn shifted_valuation_date(&self) -> Result<Date, ScenarioError> {
        Ok(self.valuation_date.add_days(self.days_held)?)
    }

    /// Checks every scenario invariant.
    ///
    /// # Errors
    /// The first violated invariant, in declaration order of the fields.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if !(self.spot_price.is_finite() && self.spot_price > 0.0) {
            return Err(ScenarioError::InvalidSpot {
                spot: self.spot_price,
            });
        }
        if !(self.strike_price.is_finite() && self.strike_price > 0.0) {
            return Err(ScenarioError::InvalidStrike {
                strike: self.strike_price,
            });
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(ScenarioError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        for (field, value) in [
            ("risk_free_rate", self.risk_free_rate),
            ("dividend_rate", self.dividend_rate),
            ("spot_move_fraction", self.spot_move_fraction),
        ] {
            if !value.is_finite() {
                return Err(ScenarioError::NonFinite { field, value });
            }
        }

        let valuation = self.shifted_valuation_date()?;
        if self.exercise_date <= valuation {
            return Err(ScenarioError::ExerciseNotAfterValuation {
                valuation,
                exercise: self.exercise_date,
            });
        }

        let effective = self.effective_spot();
        if !(effective > 0.0) {
            return Err(ScenarioError::NonPositiveEffectiveSpot { spot: effective });
        }

        Ok(())
    }
}

/// Builder for [`ScenarioParameters`].
///
/// `days_held`, `spot_move_fraction` and `day_count` default to zero, zero
/// and ACT/365F; every other field is required.
#[derive(Debug, Clone, Default)]
pub struct ScenarioBuilder {
    option_kind: Option<OptionKind>,
    spot_price: Option<f64>,
    strike_price: Option<f64>,
    volatility: Option<f64>,
    risk_free_rate: Option<f64>,
    dividend_rate: Option<f64>,
    valuation_date: Option<Date>,
    exercise_date: Option<Date>,
    days_held: u32,
    spot_move_fraction: f64,
    day_count: DayCountConvention,
}

impl ScenarioBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the option kind.
    pub fn option_kind(mut self, kind: OptionKind) -> Self {
        self.option_kind = Some(kind);
        self
    }

    /// Sets the spot price.
    pub fn spot_price(mut self, spot: f64) -> Self {
        self.spot_price = Some(spot);
        self
    }

    /// Sets the strike price.
    pub fn strike_price(mut self, strike: f64) -> Self {
        self.strike_price = Some(strike);
        self
    }

    /// Sets the volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the risk-free rate.
    pub fn risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    /// Sets the dividend yield.
    pub fn dividend_rate(mut self, rate: f64) -> Self {
        self.dividend_rate = Some(rate);
        self
    }

    /// Sets the valuation date.
    pub fn valuation_date(mut self, date: Date) -> Self {
        self.valuation_date = Some(date);
        self
    }

    /// Sets the exercise date.
    pub fn exercise_date(mut self, date: Date) -> Self {
        self.exercise_date = Some(date);
        self
    }

    /// Sets the holding period in calendar days.
    pub fn days_held(mut self, days: u32) -> Self {
        self.days_held = days;
        self
    }

    /// Sets the relative spot move.
    pub fn spot_move_fraction(mut self, fraction: f64) -> Self {
        self.spot_move_fraction = fraction;
        self
    }

    /// Sets the day count convention.
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Builds and validates the scenario.
    ///
    /// # Errors
    /// - `ScenarioError::MissingField` when a required field is unset
    /// - any error from [`ScenarioParameters::validate`]
    pub fn build(self) -> Result<ScenarioParameters, ScenarioError> {
        let scenario = ScenarioParameters {
            option_kind: self
                .option_kind
                .ok_or(ScenarioError::MissingField { field: "option_kind" })?,
            spot_price: self
                .spot_price
                .ok_or(ScenarioError::MissingField { field: "spot_price" })?,
            strike_price: self
                .strike_price
                .ok_or(ScenarioError::MissingField { field: "strike_price" })?,
            volatility: self
                .volatility
                .ok_or(ScenarioError::MissingField { field: "volatility" })?,
            risk_free_rate: self
                .risk_free_rate
                .ok_or(ScenarioError::MissingField { field: "risk_free_rate" })?,
            dividend_rate: self
                .dividend_rate
                .ok_or(ScenarioError::MissingField { field: "dividend_rate" })?,
            valuation_date: self
                .valuation_date
                .ok_or(ScenarioError::MissingField { field: "valuation_date" })?,
            exercise_date: self
                .exercise_date
                .ok_or(ScenarioError::MissingField { field: "exercise_date" })?,
            days_held: self.days_held,
            spot_move_fraction: self.spot_move_fraction,
            day_count: self.day_count,
        };

        scenario.validate()?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> ScenarioBuilder {
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
    }

    // ==========================================================
    // Builder
    // ==========================================================

    #[test]
    fn test_build_sample_scenario() {
        let scenario = base_builder().build().unwrap();
        assert_eq!(scenario.option_kind, OptionKind::Put);
        assert_eq!(scenario.days_held, 5);
        assert_eq!(scenario.day_count, DayCountConvention::Actual365Fixed);
        assert_eq!(
            scenario.shifted_valuation_date().unwrap(),
            Date::from_ymd(2021, 10, 11).unwrap()
        );
    }

    #[test]
    fn test_missing_field() {
        let result = ScenarioParameters::builder()
            .option_kind(OptionKind::Call)
            .spot_price(100.0)
            .build();
        assert_eq!(
            result.unwrap_err(),
            ScenarioError::MissingField { field: "strike_price" }
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let scenario = base_builder().days_held(0).spot_move_fraction(0.0).build().unwrap();
        assert_eq!(scenario.effective_spot(), 15.50);
    }

    // ==========================================================
    // Validation
    // ==========================================================

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(matches!(
            base_builder().spot_price(0.0).build(),
            Err(ScenarioError::InvalidSpot { .. })
        ));
        assert!(matches!(
            base_builder().strike_price(-20.0).build(),
            Err(ScenarioError::InvalidStrike { .. })
        ));
        assert!(matches!(
            base_builder().volatility(0.0).build(),
            Err(ScenarioError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        assert!(matches!(
            base_builder().risk_free_rate(f64::NAN).build(),
            Err(ScenarioError::NonFinite { field: "risk_free_rate", .. })
        ));
    }

    #[test]
    fn test_rejects_exercise_on_or_before_valuation() {
        // 2021-10-06 + 44 days = 2021-11-19
        assert!(matches!(
            base_builder().days_held(44).build(),
            Err(ScenarioError::ExerciseNotAfterValuation { .. })
        ));
        assert!(base_builder().days_held(43).build().is_ok());
    }

    #[test]
    fn test_rejects_total_loss_move() {
        assert!(matches!(
            base_builder().spot_move_fraction(-1.0).build(),
            Err(ScenarioError::NonPositiveEffectiveSpot { .. })
        ));
    }

    // ==========================================================
    // Copies
    // ==========================================================

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let base = base_builder().build().unwrap();
        let shifted = base.with_days_held(12).with_spot_move(-0.1);

        assert_eq!(base.days_held, 5);
        assert_eq!(base.spot_move_fraction, 0.05);
        assert_eq!(shifted.days_held, 12);
        assert_eq!(shifted.spot_move_fraction, -0.1);
        assert_eq!(shifted.strike_price, base.strike_price);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_with_defaults() {
        let json = r#"{
            "option_kind": "call",
            "spot_price": 100.0,
            "strike_price": 100.0,
            "volatility": 0.2,
            "risk_free_rate": 0.05,
            "dividend_rate": 0.0,
            "valuation_date": "2024-01-02",
            "exercise_date": "2025-01-02"
        }"#;
        let scenario: ScenarioParameters = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.days_held, 0);
        assert_eq!(scenario.spot_move_fraction, 0.0);
        assert!(scenario.validate().is_ok());
    }
}
