//! Black-Scholes-Merton pricing model for European options.
//!
//! Generalised to a continuous dividend yield `q`, i.e. cost of carry
//! `b = r - q`. The European value is the base onto which the American
//! approximations add their early-exercise premium.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^((b-r)T)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^((b-r)T)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (b + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;
use pricer_core::types::OptionKind;

use super::distributions::{lit, norm_cdf};
use super::error::AnalyticalError;

/// Black-Scholes-Merton model for European option pricing.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes-Merton model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or non-finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or non-finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, dividend: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(spot.is_finite() && spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility.is_finite() && volatility > T::zero()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> T {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Cost of carry b = r - q.
    #[inline]
    pub fn cost_of_carry(&self) -> T {
        self.rate - self.dividend
    }

    /// Same model with a different spot, as used when the American
    /// approximations evaluate at the critical price.
    pub fn with_spot(&self, spot: T) -> Result<Self, AnalyticalError> {
        Self::new(spot, self.rate, self.dividend, self.volatility)
    }

    /// Computes d₁ = (ln(S/K) + (b + σ²/2)T) / (σ√T).
    ///
    /// Returns ±100 (or 0 at the money) when the expiry is effectively zero.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(1e-10) {
            let large = lit::<T>(100.0);
            return if self.spot > strike {
                large
            } else if self.spot < strike {
                -large
            } else {
                T::zero()
            };
        }

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.cost_of_carry() + lit::<T>(0.5) * self.volatility * self.volatility)
            * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(1e-10) {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Carry factor e^((b-r)T) = e^(-qT) applied to the spot leg.
    #[inline]
    pub fn carry_factor(&self, expiry: T) -> T {
        ((self.cost_of_carry() - self.rate) * expiry).exp()
    }

    /// European call price. Intrinsic value at zero expiry.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(1e-10) {
            return OptionKind::Call.intrinsic(self.spot, strike);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        self.spot * self.carry_factor(expiry) * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// European put price. Intrinsic value at zero expiry.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(1e-10) {
            return OptionKind::Put.intrinsic(self.spot, strike);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        strike * discount * norm_cdf(-d2) - self.spot * self.carry_factor(expiry) * norm_cdf(-d1)
    }

    /// European price for either right.
    ///
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_core::types::OptionKind;
    ///
    /// // Haug (2007), generalised BSM put: S=100, K=95, T=0.5, r=0.10, q=0.05, σ=0.20
    /// let bs = BlackScholes::new(100.0_f64, 0.10, 0.05, 0.20).unwrap();
    /// assert!((bs.price(OptionKind::Put, 95.0, 0.5) - 2.4648).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        match kind {
            OptionKind::Call => self.price_call(strike, expiry),
            OptionKind::Put => self.price_put(strike, expiry),
        }
    }
}
