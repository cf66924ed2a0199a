//! Binomial tree engines.
//!
//! Every scheme reduces to a [`Lattice`]: node `(i, j)` (step `i`, `j` up
//! moves) sits at
//!
//! ```text
//! S(i, j) = S₀ · exp(i·drift + j·ln_up + (i - j)·ln_down)
//! ```
//!
//! with a constant up probability. The schemes differ only in how they pick
//! `drift`, `ln_up`, `ln_down` and `p`. Valuation is backward induction with
//! an early-exercise check at every node, the root included.

use pricer_models::instruments::AmericanOption;
use pricer_models::MarketModel;

use super::Priceable;
use crate::error::EngineError;

/// Default number of tree steps.
pub const DEFAULT_TREE_STEPS: usize = 801;

/// Tree construction scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BinomialScheme {
    /// Equal probabilities, log jumps σ√Δt around the drift
    JarrowRudd,
    /// Equal log jumps σ√Δt, drift carried by the probability
    CoxRossRubinstein,
    /// Equal probabilities, jumps matched to the first two moments of the log
    AdditiveEqp,
    /// Equal log jumps √(σ²Δt + drift²)
    Trigeorgis,
    /// Moment-matching multiplicative jumps
    Tian,
    /// Peizer-Pratt inversion centred on the strike
    LeisenReimer,
    /// Joshi's fourth-order probability expansion
    Joshi4,
}

impl BinomialScheme {
    /// All schemes in default evaluation order.
    pub const ALL: [BinomialScheme; 7] = [
        BinomialScheme::JarrowRudd,
        BinomialScheme::CoxRossRubinstein,
        BinomialScheme::AdditiveEqp,
        BinomialScheme::Trigeorgis,
        BinomialScheme::Tian,
        BinomialScheme::LeisenReimer,
        BinomialScheme::Joshi4,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::JarrowRudd => "Binomial Jarrow-Rudd",
            Self::CoxRossRubinstein => "Binomial Cox-Ross-Rubinstein",
            Self::AdditiveEqp => "Additive equiprobabilities",
            Self::Trigeorgis => "Binomial Trigeorgis",
            Self::Tian => "Binomial Tian",
            Self::LeisenReimer => "Binomial Leisen-Reimer",
            Self::Joshi4 => "Binomial Joshi",
        }
    }

    /// Leisen-Reimer and Joshi are defined on odd step counts only.
    pub fn requires_odd_steps(&self) -> bool {
        matches!(self, Self::LeisenReimer | Self::Joshi4)
    }

    /// Step count actually used for a requested count.
    pub fn effective_steps(&self, steps: usize) -> usize {
        if self.requires_odd_steps() && steps % 2 == 0 {
            steps + 1
        } else {
            steps
        }
    }

    /// Builds the lattice for this scheme.
    ///
    /// `steps` must already be the effective step count.
    ///
    /// # Errors
    /// `EngineError::InvalidProbability` when the branch probability falls
    /// outside (0, 1) or any tree parameter is not finite.
    #[allow(clippy::too_many_arguments)]
    pub fn lattice(
        &self,
        spot: f64,
        strike: f64,
        rate: f64,
        dividend: f64,
        volatility: f64,
        expiry: f64,
        steps: usize,
    ) -> Result<Lattice, EngineError> {
        let dt = expiry / steps as f64;
        let variance = volatility * volatility * dt;
        let drift = (rate - dividend - 0.5 * volatility * volatility) * dt;

        let lattice = match self {
            Self::JarrowRudd => {
                let up = variance.sqrt();
                Lattice::new(drift, up, -up, 0.5)
            }
            Self::CoxRossRubinstein => {
                let dx = variance.sqrt();
                Lattice::new(0.0, dx, -dx, 0.5 + 0.5 * drift / dx)
            }
            Self::AdditiveEqp => {
                let up = -0.5 * drift + 0.5 * (4.0 * variance - 3.0 * drift * drift).sqrt();
                Lattice::new(drift, up, -up, 0.5)
            }
            Self::Trigeorgis => {
                let dx = (variance + drift * drift).sqrt();
                Lattice::new(0.0, dx, -dx, 0.5 + 0.5 * drift / dx)
            }
            Self::Tian => {
                let v = variance.exp();
                let growth = drift.exp() * v.sqrt();
                let spread = (v * v + 2.0 * v - 3.0).sqrt();
                let up = 0.5 * growth * v * (v + 1.0 + spread);
                let down = 0.5 * growth * v * (v + 1.0 - spread);
                Lattice::new(0.0, up.ln(), down.ln(), (growth - down) / (up - down))
            }
            Self::LeisenReimer | Self::Joshi4 => {
                let std_dev = volatility * expiry.sqrt();
                let d2 = ((spot / strike).ln() + drift * steps as f64) / std_dev;
                let n = steps as f64;
                let (p, p_dash) = if *self == Self::LeisenReimer {
                    (peizer_pratt_2(d2, n), peizer_pratt_2(d2 + std_dev, n))
                } else {
                    let k = (n - 1.0) / 2.0;
                    (joshi_up_probability(k, d2), joshi_up_probability(k, d2 + std_dev))
                };
                let growth = ((rate - dividend) * dt).exp();
                let up = growth * p_dash / p;
                let down = (growth - p * up) / (1.0 - p);
                Lattice::new(0.0, up.ln(), down.ln(), p)
            }
        };

        lattice.validate(self.name())
    }
}

/// Peizer-Pratt method 2 inversion of the normal CDF on an `n`-step tree.
fn peizer_pratt_2(z: f64, n: f64) -> f64 {
    let t = z / (n + 1.0 / 3.0 + 0.1 / (n + 1.0));
    let t = (-t * t * (n + 1.0 / 6.0)).exp();
    0.5 + z.signum() * (0.25 * (1.0 - t)).sqrt()
}

/// Joshi's fourth-order up-probability for `k = (n - 1) / 2`.
fn joshi_up_probability(k: f64, d: f64) -> f64 {
    let alpha = d / 8.0_f64.sqrt();
    let alpha2 = alpha * alpha;
    let alpha3 = alpha * alpha2;
    let alpha5 = alpha3 * alpha2;
    let alpha7 = alpha5 * alpha2;

    let beta = -0.375 * alpha - alpha3;
    let gamma = (5.0 / 6.0) * alpha5 + (13.0 / 12.0) * alpha3 + (25.0 / 128.0) * alpha;
    let delta = -0.1025 * alpha - 0.9285 * alpha3 - 1.43 * alpha5 - 0.5 * alpha7;

    let root_k = k.sqrt();
    0.5 + alpha / root_k
        + beta / (k * root_k)
        + gamma / (k * k * root_k)
        + delta / (k * k * k * root_k)
}

/// Recombining tree in log-spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    /// Deterministic log move per step
    pub drift: f64,
    /// Log move on an up branch
    pub ln_up: f64,
    /// Log move on a down branch
    pub ln_down: f64,
    /// Up-branch probability
    pub up_probability: f64,
}

impl Lattice {
    fn new(drift: f64, ln_up: f64, ln_down: f64, up_probability: f64) -> Self {
        Self {
            drift,
            ln_up,
            ln_down,
            up_probability,
        }
    }

    fn validate(self, scheme: &'static str) -> Result<Self, EngineError> {
        let p = self.up_probability;
        let finite = self.drift.is_finite() && self.ln_up.is_finite() && self.ln_down.is_finite();
        if !(finite && p > 0.0 && p < 1.0) {
            return Err(EngineError::InvalidProbability {
                scheme,
                probability: p,
            });
        }
        Ok(self)
    }

    /// Underlying at node `(step, ups)`.
    pub fn underlying(&self, spot: f64, step: usize, ups: usize) -> f64 {
        let i = step as f64;
        let j = ups as f64;
        spot * (i * self.drift + j * self.ln_up + (i - j) * self.ln_down).exp()
    }

    /// American value by backward induction over `steps` steps.
    pub fn rollback(&self, option: &AmericanOption, spot: f64, rate: f64, expiry: f64, steps: usize) -> f64 {
        let dt = expiry / steps as f64;
        let discount = (-rate * dt).exp();
        let p_up = discount * self.up_probability;
        let p_down = discount * (1.0 - self.up_probability);
        let ratio = (self.ln_up - self.ln_down).exp();

        let mut values: Vec<f64> = (0..=steps)
            .map(|j| option.payoff(self.underlying(spot, steps, j)))
            .collect();

        for step in (0..steps).rev() {
            let mut node = self.underlying(spot, step, 0);
            for j in 0..=step {
                let continuation = p_up * values[j + 1] + p_down * values[j];
                values[j] = continuation.max(option.payoff(node));
                node *= ratio;
            }
        }

        values[0]
    }
}

/// Binomial tree engine.
///
/// # Examples
/// ```
/// use pricer_pricing::engines::{BinomialEngine, BinomialScheme, Priceable};
///
/// let engine = BinomialEngine::new(BinomialScheme::LeisenReimer, 800);
/// assert_eq!(engine.name(), "Binomial Leisen-Reimer");
/// assert_eq!(engine.effective_steps(), 801);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinomialEngine {
    scheme: BinomialScheme,
    #[cfg_attr(feature = "serde", serde(default = "default_steps"))]
    steps: usize,
}

#[cfg(feature = "serde")]
fn default_steps() -> usize {
    DEFAULT_TREE_STEPS
}

impl BinomialEngine {
    /// Creates the engine.
    pub fn new(scheme: BinomialScheme, steps: usize) -> Self {
        Self { scheme, steps }
    }

    /// Tree scheme.
    pub fn scheme(&self) -> BinomialScheme {
        self.scheme
    }

    /// Requested step count.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step count after odd rounding.
    pub fn effective_steps(&self) -> usize {
        self.scheme.effective_steps(self.steps)
    }
}

impl Priceable for BinomialEngine {
    fn name(&self) -> &'static str {
        self.scheme.name()
    }

    fn price(&self, market: &MarketModel, option: &AmericanOption) -> Result<f64, EngineError> {
        if self.steps == 0 {
            return Err(EngineError::InvalidConfiguration {
                message: format!("{} needs at least one step", self.name()),
            });
        }

        let steps = self.effective_steps();
        let spot = market.effective_spot();
        let rate = market.rate();
        let expiry = market.time_to_expiry();
        let sigma = market.volatility_for(option)?;

        let lattice = self.scheme.lattice(
            spot,
            option.strike(),
            rate,
            market.dividend_yield(),
            sigma,
            expiry,
            steps,
        )?;
        let price = lattice.rollback(option, spot, rate, expiry, steps);

        if price.is_finite() {
            Ok(price)
        } else {
            Err(EngineError::NonFinite { engine: self.name() })
        }
    }
}
