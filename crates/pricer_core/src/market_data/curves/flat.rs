//! Flat yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};
use num_traits::Float;

/// Flat yield curve with constant continuously compounded rate.
///
/// Used for both the risk-free rate and the dividend yield of a scenario.
/// Anchored at the valuation date of the market it belongs to.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let anchor = Date::from_ymd(2021, 10, 11).unwrap();
/// let curve = FlatCurve::new(0.0152_f64, anchor, DayCountConvention::Actual365Fixed);
///
/// assert_eq!(curve.rate(), 0.0152);
/// assert_eq!(curve.zero_rate(0.5).unwrap(), 0.0152);
/// assert_eq!(curve.reference_date(), anchor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    rate: T,
    reference_date: Date,
    day_count: DayCountConvention,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve anchored at `reference_date`.
    #[inline]
    pub fn new(rate: T, reference_date: Date, day_count: DayCountConvention) -> Self {
        Self {
            rate,
            reference_date,
            day_count,
        }
    }

    /// Construct a flat curve, rejecting NaN or infinite rates.
    pub fn try_new(
        rate: T,
        reference_date: Date,
        day_count: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        if !rate.is_finite() {
            return Err(MarketDataError::InvalidRate {
                rate: rate.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self::new(rate, reference_date, day_count))
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    /// D(t) = exp(-r * t)
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.rate * t).exp())
    }

    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn anchor() -> Date {
        Date::from_ymd(2021, 10, 11).unwrap()
    }

    #[test]
    fn test_discount_factor_at_zero_is_one() {
        let curve = FlatCurve::new(0.0152_f64, anchor(), DayCountConvention::default());
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_discount_factor_formula() {
        let curve = FlatCurve::new(0.0152_f64, anchor(), DayCountConvention::default());
        assert_relative_eq!(
            curve.discount_factor(0.25).unwrap(),
            (-0.0152_f64 * 0.25).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_negative_maturity_rejected() {
        let curve = FlatCurve::new(0.05_f64, anchor(), DayCountConvention::default());
        assert!(matches!(
            curve.discount_factor(-0.1),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_negative_rate_allowed() {
        let curve = FlatCurve::new(-0.01_f64, anchor(), DayCountConvention::default());
        assert!(curve.discount_factor(1.0).unwrap() > 1.0);
    }

    #[test]
    fn test_try_new_rejects_nan() {
        assert!(matches!(
            FlatCurve::try_new(f64::NAN, anchor(), DayCountConvention::default()),
            Err(MarketDataError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_discount_to_uses_day_count() {
        let curve = FlatCurve::new(0.05_f64, anchor(), DayCountConvention::Actual360);
        let expiry = Date::from_ymd(2021, 11, 19).unwrap();
        assert_relative_eq!(
            curve.discount_to(expiry).unwrap(),
            (-0.05_f64 * 39.0 / 360.0).exp(),
            epsilon = 1e-15
        );
    }
}
