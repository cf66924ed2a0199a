//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};
use num_traits::Float;

/// Generic yield curve trait for discount factor and rate calculations.
///
/// A curve is anchored at a reference date; times are year fractions from
/// that date under the curve's day count convention. The same trait serves
/// both the risk-free curve and the continuous dividend yield curve.
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) > 0 for all t >= 0
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let anchor = Date::from_ymd(2021, 10, 11).unwrap();
/// let curve = FlatCurve::new(0.05_f64, anchor, DayCountConvention::Actual365Fixed);
///
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// let expiry = Date::from_ymd(2022, 10, 11).unwrap();
/// assert!((curve.discount_to(expiry).unwrap() - df).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Return the discount factor for maturity `t`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if t < 0.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Date the curve is anchored at (t = 0).
    fn reference_date(&self) -> Date;

    /// Day count used to turn dates into year fractions.
    fn day_count(&self) -> DayCountConvention;

    /// Return the continuously compounded zero rate for maturity `t`.
    ///
    /// ```text
    /// r(t) = -ln(D(t)) / t
    /// ```
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        let df = self.discount_factor(t)?;
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(-df.ln() / t)
    }

    /// Year fraction from the reference date to `date`.
    fn time_from_reference(&self, date: Date) -> Result<T, MarketDataError> {
        let reference = self.reference_date();
        if date < reference {
            return Err(MarketDataError::BeforeReferenceDate { date, reference });
        }
        let t = self.day_count().year_fraction(reference, date);
        T::from(t).ok_or(MarketDataError::InvalidMaturity { t })
    }

    /// Discount factor from `date` back to the reference date.
    fn discount_to(&self, date: Date) -> Result<T, MarketDataError> {
        let t = self.time_from_reference(date)?;
        self.discount_factor(t)
    }
}
