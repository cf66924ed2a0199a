//! Flat volatility surface implementation.

use super::VolatilitySurface;
use crate::market_data::error::MarketDataError;
use crate::types::Date;
use num_traits::Float;

/// Flat volatility surface: the same σ for every strike and expiry.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolatilitySurface, FlatVol};
/// use pricer_core::types::Date;
///
/// let surface = FlatVol::try_new(0.20_f64, Date::from_ymd(2024, 1, 2).unwrap()).unwrap();
///
/// assert_eq!(surface.volatility(80.0, 0.5).unwrap(), 0.20);
/// assert_eq!(surface.volatility(120.0, 2.0).unwrap(), 0.20);
/// assert_eq!(surface.sigma(), 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVol<T: Float> {
    sigma: T,
    reference_date: Date,
}

impl<T: Float> FlatVol<T> {
    /// Construct a flat volatility surface anchored at `reference_date`.
    #[inline]
    pub fn new(sigma: T, reference_date: Date) -> Self {
        Self {
            sigma,
            reference_date,
        }
    }

    /// Construct a flat surface, rejecting non-positive or non-finite σ.
    pub fn try_new(sigma: T, reference_date: Date) -> Result<Self, MarketDataError> {
        if !sigma.is_finite() || sigma <= T::zero() {
            return Err(MarketDataError::InvalidVolatility {
                sigma: sigma.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self::new(sigma, reference_date))
    }

    /// Return the constant volatility.
    #[inline]
    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: Float> VolatilitySurface<T> for FlatVol<T> {
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        if strike <= T::zero() {
            return Err(MarketDataError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(0.0),
            });
        }
        if expiry <= T::zero() {
            return Err(MarketDataError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.sigma)
    }

    fn reference_date(&self) -> Date {
        self.reference_date
    }
}
