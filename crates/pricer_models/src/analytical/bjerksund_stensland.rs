//! Bjerksund-Stensland (1993) flat-boundary approximation for American options.
//!
//! The exercise boundary is approximated by a single flat trigger price `I`,
//! which yields a closed form in terms of the auxiliary function φ. Puts are
//! priced through the put-call transformation
//! `P(S, K, T, r, b, σ) = C(K, S, T, r - b, -b, σ)`.
//!
//! A flat boundary is a lower bound on the true American value. It can fall
//! below the European value for short-dated options and below intrinsic
//! value deep in the money, so the price returned here is floored at both.

use num_traits::Float;
use pricer_core::types::OptionKind;

use super::barone_adesi_whaley::{finite, validate_terms};
use super::black_scholes::BlackScholes;
use super::distributions::{lit, norm_cdf};
use super::error::AnalyticalError;

/// Bjerksund-Stensland (1993) American option approximation.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BjerksundStensland;
/// use pricer_core::types::OptionKind;
///
/// let bjs = BjerksundStensland::new(100.0_f64, 0.10, 0.10, 0.25).unwrap();
/// let put = bjs.price(OptionKind::Put, 100.0, 0.5).unwrap();
/// assert!((put - 6.7571).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct BjerksundStensland<T: Float> {
    model: BlackScholes<T>,
}

impl<T: Float> BjerksundStensland<T> {
    /// Creates the approximation for the given market.
    ///
    /// # Errors
    /// Same as [`BlackScholes::new`].
    pub fn new(spot: T, rate: T, dividend: T, volatility: T) -> Result<Self, AnalyticalError> {
        Ok(Self {
            model: BlackScholes::new(spot, rate, dividend, volatility)?,
        })
    }

    /// Builds the approximation on top of an existing European model.
    pub fn from_model(model: BlackScholes<T>) -> Self {
        Self { model }
    }

    /// The underlying European model.
    pub fn model(&self) -> &BlackScholes<T> {
        &self.model
    }

    /// American option price, never below the European or intrinsic value.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` / `InvalidExpiry` for non-positive inputs
    /// - `AnalyticalError::NumericalInstability` if the result is not finite
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        validate_terms(strike, expiry)?;

        let european = self.model.price(kind, strike, expiry);
        let flat_boundary = self.flat_boundary_price(kind, strike, expiry)?;
        let intrinsic = kind.intrinsic(self.model.spot(), strike);

        Ok(flat_boundary.max(european).max(intrinsic))
    }

    /// Raw flat-boundary value without the floors.
    pub fn flat_boundary_price(
        &self,
        kind: OptionKind,
        strike: T,
        expiry: T,
    ) -> Result<T, AnalyticalError> {
        validate_terms(strike, expiry)?;

        let spot = self.model.spot();
        let rate = self.model.rate();
        let carry = self.model.cost_of_carry();
        let sigma = self.model.volatility();

        let value = match kind {
            OptionKind::Call => call_value(spot, strike, expiry, rate, carry, sigma),
            OptionKind::Put => call_value(strike, spot, expiry, rate - carry, -carry, sigma),
        };

        finite(value)
    }
}

/// Flat-boundary call on (S, X, T, r, b, σ).
fn call_value<T: Float>(s: T, x: T, t: T, r: T, b: T, sigma: T) -> T {
    // Never optimal to exercise early
    if b >= r {
        return BlackScholes::new(s, r, r - b, sigma)
            .map(|m| m.price_call(x, t))
            .unwrap_or_else(|_| T::nan());
    }

    let half = lit::<T>(0.5);
    let two = lit::<T>(2.0);
    let variance = sigma * sigma;

    let beta = (half - b / variance)
        + ((b / variance - half).powi(2) + two * r / variance).sqrt();
    let b_infinity = beta / (beta - T::one()) * x;
    let b_zero = x.max(r / (r - b) * x);
    let h_t = -(b * t + two * sigma * t.sqrt()) * b_zero / (b_infinity - b_zero);
    let trigger = b_zero + (b_infinity - b_zero) * (T::one() - h_t.exp());

    if s >= trigger {
        return s - x;
    }

    let alpha = (trigger - x) * trigger.powf(-beta);
    let phi_at = |gamma: T, h: T| phi(s, t, gamma, h, trigger, r, b, sigma);

    alpha * s.powf(beta) - alpha * phi_at(beta, trigger) + phi_at(T::one(), trigger)
        - phi_at(T::one(), x)
        - x * phi_at(T::zero(), trigger)
        + x * phi_at(T::zero(), x)
}

/// Auxiliary function φ(S, T, γ, H, I) of the 1993 paper.
#[allow(clippy::too_many_arguments)]
fn phi<T: Float>(s: T, t: T, gamma: T, h: T, trigger: T, r: T, b: T, sigma: T) -> T {
    let half = lit::<T>(0.5);
    let two = lit::<T>(2.0);
    let variance = sigma * sigma;
    let sigma_sqrt_t = sigma * t.sqrt();

    let lambda = (-r + gamma * b + half * gamma * (gamma - T::one()) * variance) * t;
    let d = -((s / h).ln() + (b + (gamma - half) * variance) * t) / sigma_sqrt_t;
    let kappa = two * b / variance + (two * gamma - T::one());

    lambda.exp()
        * s.powf(gamma)
        * (norm_cdf(d)
            - (trigger / s).powf(kappa) * norm_cdf(d - two * (trigger / s).ln() / sigma_sqrt_t))
}
