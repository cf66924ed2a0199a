//! Barone-Adesi-Whaley (1987) quadratic approximation for American options.
//!
//! The American value is the European Black-Scholes-Merton value plus an
//! early-exercise premium `A·(S/S*)^q`, where `S*` is the critical price
//! solving the smooth-pasting condition. `S*` is found by Newton-Raphson
//! from the standard BAW seed.
//!
//! ## Exponents
//!
//! With `n = 2b/σ²`, `m = 2r/σ²` and `k = m / (1 - e^(-rT))` (limit `2/(σ²T)` as r → 0):
//!
//! - q₂ (calls) = (-(n-1) + √((n-1)² + 4k)) / 2
//! - q₁ (puts)  = (-(n-1) - √((n-1)² + 4k)) / 2

use num_traits::Float;
use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use pricer_core::types::OptionKind;

use super::black_scholes::BlackScholes;
use super::distributions::{lit, norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Relative tolerance (fraction of strike) for the critical price search.
const CRITICAL_PRICE_TOLERANCE: f64 = 1e-6;

/// Maximum Newton iterations for the critical price search.
const CRITICAL_PRICE_MAX_ITERATIONS: usize = 100;

/// Barone-Adesi-Whaley American option approximation.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BaroneAdesiWhaley;
/// use pricer_core::types::OptionKind;
///
/// // Haug (2007) table: K=100, r=0.10, q=0.10, T=0.5, σ=0.25
/// let baw = BaroneAdesiWhaley::new(90.0_f64, 0.10, 0.10, 0.25).unwrap();
/// let put = baw.price(OptionKind::Put, 100.0, 0.5).unwrap();
/// assert!((put - 12.4419).abs() < 3e-3);
/// ```
#[derive(Debug, Clone)]
pub struct BaroneAdesiWhaley<T: Float> {
    model: BlackScholes<T>,
}

impl<T: Float> BaroneAdesiWhaley<T> {
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

    /// True when early exercise can carry value: calls need b < r, puts need r > 0.
    pub fn has_early_exercise(&self, kind: OptionKind) -> bool {
        match kind {
            OptionKind::Call => self.model.cost_of_carry() < self.model.rate(),
            OptionKind::Put => self.model.rate() > T::zero(),
        }
    }

    /// American option price.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` / `InvalidExpiry` for non-positive inputs
    /// - `AnalyticalError::CriticalPrice` if the Newton search fails
    /// - `AnalyticalError::NumericalInstability` if the result is not finite
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        validate_terms(strike, expiry)?;

        let european = self.model.price(kind, strike, expiry);
        if !self.has_early_exercise(kind) {
            return finite(european);
        }

        let critical = self.critical_price(kind, strike, expiry)?;
        let q = self.exponent(kind, expiry)?;
        let spot = self.model.spot();
        let carry = self.model.carry_factor(expiry);
        let d1 = self.model.with_spot(critical)?.d1(strike, expiry);

        let value = match kind {
            OptionKind::Call => {
                if spot < critical {
                    let a2 = (critical / q) * (T::one() - carry * norm_cdf(d1));
                    european + a2 * (spot / critical).powf(q)
                } else {
                    spot - strike
                }
            }
            OptionKind::Put => {
                if spot > critical {
                    let a1 = -(critical / q) * (T::one() - carry * norm_cdf(-d1));
                    european + a1 * (spot / critical).powf(q)
                } else {
                    strike - spot
                }
            }
        };

        finite(value)
    }

    /// Critical spot price S* at which immediate exercise becomes optimal.
    ///
    /// ```
    /// use pricer_models::analytical::BaroneAdesiWhaley;
    /// use pricer_core::types::OptionKind;
    ///
    /// let baw = BaroneAdesiWhaley::new(100.0_f64, 0.10, 0.10, 0.25).unwrap();
    /// let put_boundary = baw.critical_price(OptionKind::Put, 100.0, 0.5).unwrap();
    /// let call_boundary = baw.critical_price(OptionKind::Call, 100.0, 0.5).unwrap();
    /// assert!(put_boundary < 100.0 && call_boundary > 100.0);
    /// ```
    pub fn critical_price(
        &self,
        kind: OptionKind,
        strike: T,
        expiry: T,
    ) -> Result<T, AnalyticalError> {
        validate_terms(strike, expiry)?;

        let sigma = self.model.volatility();
        let sigma_sqrt_t = sigma * expiry.sqrt();
        let b = self.model.cost_of_carry();
        let (n, m) = self.carry_ratios();
        let two = lit::<T>(2.0);
        let four = lit::<T>(4.0);

        // Infinite-horizon root seeds the finite-horizon boundary
        let discriminant = (n - T::one()).powi(2) + four * m;
        if discriminant < T::zero() {
            return Err(AnalyticalError::NumericalInstability {
                message: "negative discriminant in BAW seed".to_string(),
            });
        }
        let q_inf = match kind {
            OptionKind::Call => (-(n - T::one()) + discriminant.sqrt()) / two,
            OptionKind::Put => (-(n - T::one()) - discriminant.sqrt()) / two,
        };
        let s_inf = strike / (T::one() - T::one() / q_inf);
        let seed = match kind {
            OptionKind::Call => {
                let h2 = -(b * expiry + two * sigma_sqrt_t) * strike / (s_inf - strike);
                strike + (s_inf - strike) * (T::one() - h2.exp())
            }
            OptionKind::Put => {
                let h1 = (b * expiry - two * sigma_sqrt_t) * strike / (strike - s_inf);
                s_inf + (strike - s_inf) * h1.exp()
            }
        };

        let q = self.exponent(kind, expiry)?;
        let carry = self.model.carry_factor(expiry);
        let model = &self.model;

        let smooth_pasting = |si: T| -> (T, T) {
            let at_si = match model.with_spot(si) {
                Ok(m) => m,
                Err(_) => return (T::nan(), T::nan()),
            };
            let d1 = at_si.d1(strike, expiry);
            let european = at_si.price(kind, strike, expiry);
            match kind {
                OptionKind::Call => {
                    let rhs = european + (T::one() - carry * norm_cdf(d1)) * si / q;
                    let bi = carry * norm_cdf(d1) * (T::one() - T::one() / q)
                        + (T::one() - carry * norm_pdf(d1) / sigma_sqrt_t) / q;
                    (si - strike - rhs, T::one() - bi)
                }
                OptionKind::Put => {
                    let rhs = european - (T::one() - carry * norm_cdf(-d1)) * si / q;
                    let bi = -carry * norm_cdf(-d1) * (T::one() - T::one() / q)
                        - (T::one() + carry * norm_pdf(-d1) / sigma_sqrt_t) / q;
                    (strike - si - rhs, -T::one() - bi)
                }
            }
        };

        let config = SolverConfig::new(
            strike * lit(CRITICAL_PRICE_TOLERANCE),
            CRITICAL_PRICE_MAX_ITERATIONS,
        )?;
        let solver = NewtonRaphsonSolver::new(config);
        let (lower, upper) = match kind {
            OptionKind::Call => (strike, T::infinity()),
            OptionKind::Put => (strike * lit(1e-8), strike),
        };

        Ok(solver.find_root_bounded(smooth_pasting, seed, lower, upper)?)
    }

    /// (n, m) = (2b/σ², 2r/σ²)
    fn carry_ratios(&self) -> (T, T) {
        let variance_rate = self.model.volatility().powi(2);
        let two = lit::<T>(2.0);
        (
            two * self.model.cost_of_carry() / variance_rate,
            two * self.model.rate() / variance_rate,
        )
    }

    /// Finite-horizon exponent q₂ (calls) or q₁ (puts).
    fn exponent(&self, kind: OptionKind, expiry: T) -> Result<T, AnalyticalError> {
        let (n, m) = self.carry_ratios();
        let r_t = self.model.rate() * expiry;
        let k = if r_t.abs() > lit(1e-12) {
            m / (T::one() - (-r_t).exp())
        } else {
            lit::<T>(2.0) / (self.model.volatility().powi(2) * expiry)
        };

        let discriminant = (n - T::one()).powi(2) + lit::<T>(4.0) * k;
        if !(discriminant >= T::zero()) {
            return Err(AnalyticalError::NumericalInstability {
                message: "negative discriminant in BAW exponent".to_string(),
            });
        }
        let two = lit::<T>(2.0);
        Ok(match kind {
            OptionKind::Call => (-(n - T::one()) + discriminant.sqrt()) / two,
            OptionKind::Put => (-(n - T::one()) - discriminant.sqrt()) / two,
        })
    }
}

pub(crate) fn validate_terms<T: Float>(strike: T, expiry: T) -> Result<(), AnalyticalError> {
    if !(strike.is_finite() && strike > T::zero()) {
        return Err(AnalyticalError::InvalidStrike {
            strike: strike.to_f64().unwrap_or(f64::NAN),
        });
    }
    if !(expiry.is_finite() && expiry > T::zero()) {
        return Err(AnalyticalError::InvalidExpiry {
            expiry: expiry.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

pub(crate) fn finite<T: Float>(value: T) -> Result<T, AnalyticalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticalError::NumericalInstability {
            message: "approximation produced a non-finite price".to_string(),
        })
    }
}
