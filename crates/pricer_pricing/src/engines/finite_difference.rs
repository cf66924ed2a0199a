//! Finite-difference engine for the Black-Scholes-Merton PDE.
//!
//! In log-spot `x = ln S` and time to expiry `τ` the value solves
//!
//! ```text
//! V_τ = ½σ² V_xx + (b - ½σ²) V_x - r V
//! ```
//!
//! which is discretised with central differences on a uniform grid and
//! stepped with a θ-scheme: fully implicit for the first `damping_steps`
//! steps (Rannacher start-up, smoothing the payoff kink), Crank-Nicolson
//! afterwards. Early exercise is enforced after every step by projecting
//! onto the exercise value.

use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
use pricer_core::math::solvers::TridiagonalSolver;
use pricer_core::types::OptionKind;
use pricer_models::instruments::AmericanOption;
use pricer_models::MarketModel;

use super::Priceable;
use crate::error::EngineError;

/// Default number of time steps.
pub const DEFAULT_TIME_STEPS: usize = 801;

/// Default number of log-spot nodes.
pub const DEFAULT_PRICE_NODES: usize = 800;

/// Default number of fully implicit start-up steps.
pub const DEFAULT_DAMPING_STEPS: usize = 2;

/// Half-width of the log-spot domain in standard deviations.
const DOMAIN_STD_DEVS: f64 = 5.0;

/// Crank-Nicolson finite-difference engine.
///
/// # Examples
/// ```
/// use pricer_pricing::engines::{FiniteDifferenceEngine, Priceable};
///
/// let engine = FiniteDifferenceEngine::new(401, 400).unwrap();
/// assert_eq!(engine.name(), "Finite differences");
/// assert_eq!(engine.time_steps(), 401);
/// assert!(FiniteDifferenceEngine::new(0, 400).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FiniteDifferenceEngine {
    time_steps: usize,
    price_nodes: usize,
    damping_steps: usize,
}

impl Default for FiniteDifferenceEngine {
    fn default() -> Self {
        Self {
            time_steps: DEFAULT_TIME_STEPS,
            price_nodes: DEFAULT_PRICE_NODES,
            damping_steps: DEFAULT_DAMPING_STEPS,
        }
    }
}

impl FiniteDifferenceEngine {
    /// Creates an engine with the given grid.
    ///
    /// # Errors
    /// `EngineError::InvalidConfiguration` if there is no time step or
    /// fewer than three price nodes.
    pub fn new(time_steps: usize, price_nodes: usize) -> Result<Self, EngineError> {
        let engine = Self {
            time_steps,
            price_nodes,
            damping_steps: DEFAULT_DAMPING_STEPS,
        };
        engine.check_grid()?;
        Ok(engine)
    }

    /// Sets the number of fully implicit start-up steps.
    pub fn with_damping_steps(mut self, damping_steps: usize) -> Self {
        self.damping_steps = damping_steps;
        self
    }

    /// Number of time steps.
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Number of log-spot nodes.
    pub fn price_nodes(&self) -> usize {
        self.price_nodes
    }

    /// Number of fully implicit start-up steps.
    pub fn damping_steps(&self) -> usize {
        self.damping_steps
    }

    fn check_grid(&self) -> Result<(), EngineError> {
        if self.time_steps == 0 {
            return Err(EngineError::InvalidConfiguration {
                message: "finite-difference engine needs at least one time step".to_string(),
            });
        }
        if self.price_nodes < 3 {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "finite-difference engine needs at least 3 price nodes, got {}",
                    self.price_nodes
                ),
            });
        }
        Ok(())
    }
}

/// Dirichlet value at the edge of the grid: the larger of intrinsic and
/// discounted forward intrinsic value.
fn boundary_value(kind: OptionKind, spot: f64, strike: f64, rate: f64, dividend: f64, tau: f64) -> f64 {
    let forward = spot * (-dividend * tau).exp() - strike * (-rate * tau).exp();
    let discounted = match kind {
        OptionKind::Call => forward,
        OptionKind::Put => -forward,
    };
    kind.intrinsic(spot, strike).max(discounted)
}

impl Priceable for FiniteDifferenceEngine {
    fn name(&self) -> &'static str {
        "Finite differences"
    }

    fn price(&self, market: &MarketModel, option: &AmericanOption) -> Result<f64, EngineError> {
        self.check_grid()?;

        let kind = option.kind();
        let strike = option.strike();
        let spot = market.effective_spot();
        let expiry = market.time_to_expiry();
        let sigma = market.volatility_for(option)?;
        let rate = market.rate();
        let dividend = market.dividend_yield();

        let log_spot = spot.ln();
        let log_strike = strike.ln();
        let half_width = DOMAIN_STD_DEVS * sigma * expiry.sqrt();
        let x_min = log_spot.min(log_strike) - half_width;
        let x_max = log_spot.max(log_strike) + half_width;

        let n = self.price_nodes;
        let dx = (x_max - x_min) / (n - 1) as f64;
        let grid: Vec<f64> = (0..n).map(|i| x_min + i as f64 * dx).collect();
        let spots: Vec<f64> = grid.iter().map(|x| x.exp()).collect();
        let exercise: Vec<f64> = spots.iter().map(|&s| option.payoff(s)).collect();

        // Spatial operator L V_i = a V_{i-1} + c V_i + u V_{i+1}
        let variance = sigma * sigma;
        let drift = rate - dividend - 0.5 * variance;
        let diffusion = variance / (2.0 * dx * dx);
        let convection = drift / (2.0 * dx);
        let a = diffusion - convection;
        let u = diffusion + convection;
        let c = -2.0 * diffusion - rate;

        let interior = n - 2;
        let mut solver = TridiagonalSolver::new(interior);
        let mut lower = vec![0.0; interior];
        let mut diag = vec![0.0; interior];
        let mut upper = vec![0.0; interior];
        let mut rhs = vec![0.0; interior];
        let mut solution = vec![0.0; interior];

        let mut values = exercise.clone();
        let dt = expiry / self.time_steps as f64;

        for step in 0..self.time_steps {
            let theta = if step < self.damping_steps { 1.0 } else { 0.5 };
            let explicit = (1.0 - theta) * dt;
            let implicit = theta * dt;
            let tau = (step + 1) as f64 * dt;

            let low = boundary_value(kind, spots[0], strike, rate, dividend, tau);
            let high = boundary_value(kind, spots[n - 1], strike, rate, dividend, tau);

            for i in 0..interior {
                let k = i + 1;
                rhs[i] = values[k]
                    + explicit * (a * values[k - 1] + c * values[k] + u * values[k + 1]);
                lower[i] = -implicit * a;
                diag[i] = 1.0 - implicit * c;
                upper[i] = -implicit * u;
            }
            rhs[0] += implicit * a * low;
            rhs[interior - 1] += implicit * u * high;

            solver.solve(&lower, &diag, &upper, &rhs, &mut solution)?;

            values[0] = low;
            values[n - 1] = high;
            values[1..n - 1].copy_from_slice(&solution);

            for (value, &payoff) in values.iter_mut().zip(&exercise) {
                *value = value.max(payoff);
            }
        }

        let interpolator = LinearInterpolator::from_sorted(grid, values)?;
        let price = interpolator.interpolate(log_spot)?;

        if price.is_finite() {
            Ok(price)
        } else {
            Err(EngineError::NonFinite { engine: self.name() })
        }
    }
}
