//! Volatility surface trait definition.

use crate::market_data::error::MarketDataError;
use crate::types::Date;
use num_traits::Float;

/// Generic volatility surface trait for Black volatility lookup.
///
/// # Invariants
///
/// - σ > 0 for all valid (strike, expiry) pairs
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolatilitySurface, FlatVol};
/// use pricer_core::types::Date;
///
/// let surface = FlatVol::new(0.5815_f64, Date::from_ymd(2021, 10, 11).unwrap());
/// assert_eq!(surface.volatility(20.0, 0.1).unwrap(), 0.5815);
/// ```
pub trait VolatilitySurface<T: Float> {
    /// Return the Black volatility for given strike and expiry.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidStrike` if strike <= 0
    /// * `MarketDataError::InvalidExpiry` if expiry <= 0
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError>;

    /// Date the surface is anchored at.
    fn reference_date(&self) -> Date;
}
