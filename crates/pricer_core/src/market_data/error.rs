//! Market data error types.

use crate::types::{Date, PricingError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative time to maturity
/// - `InvalidStrike`: Non-positive strike price
/// - `InvalidExpiry`: Non-positive time to expiry
/// - `InvalidRate`: Non-finite rate
/// - `InvalidVolatility`: Non-positive or non-finite volatility
/// - `BeforeReferenceDate`: Query date earlier than the curve anchor
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry (non-positive).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Rate is NaN or infinite.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Volatility is non-positive, NaN or infinite.
    #[error("Invalid volatility: sigma = {sigma}")]
    InvalidVolatility {
        /// The invalid volatility value
        sigma: f64,
    },

    /// Query date precedes the date the market data is anchored at.
    #[error("Date {date} is before reference date {reference}")]
    BeforeReferenceDate {
        /// Queried date
        date: Date,
        /// Anchor date
        reference: Date,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_maturity_display() {
        let err = MarketDataError::InvalidMaturity { t: -1.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: t = -1.5");
    }

    #[test]
    fn test_invalid_volatility_display() {
        let err = MarketDataError::InvalidVolatility { sigma: 0.0 };
        assert_eq!(format!("{}", err), "Invalid volatility: sigma = 0");
    }

    #[test]
    fn test_before_reference_display() {
        let err = MarketDataError::BeforeReferenceDate {
            date: Date::from_ymd(2021, 10, 1).unwrap(),
            reference: Date::from_ymd(2021, 10, 6).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Date 2021-10-01 is before reference date 2021-10-06"
        );
    }

    #[test]
    fn test_into_pricing_error() {
        let pricing_err: PricingError = MarketDataError::InvalidMaturity { t: -1.0 }.into();
        match pricing_err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("-1")),
            _ => panic!("Expected InvalidInput variant"),
        }
    }
}
