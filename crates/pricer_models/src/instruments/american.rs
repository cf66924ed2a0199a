//! American option terms.

use pricer_core::types::{Date, OptionKind};

/// Vanilla American option: exercisable on any day of its window.
///
/// # Examples
/// ```
/// use pricer_models::instruments::AmericanOption;
/// use pricer_core::types::{Date, OptionKind};
///
/// let option = AmericanOption::new(
///     OptionKind::Put,
///     20.0,
///     Date::from_ymd(2021, 10, 11).unwrap(),
///     Date::from_ymd(2021, 11, 19).unwrap(),
/// );
/// assert!((option.payoff(16.275) - 3.725).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmericanOption {
    kind: OptionKind,
    strike: f64,
    earliest_exercise: Date,
    latest_exercise: Date,
}

impl AmericanOption {
    /// Creates the option. Strike positivity is checked at scenario level.
    pub fn new(kind: OptionKind, strike: f64, earliest_exercise: Date, latest_exercise: Date) -> Self {
        Self {
            kind,
            strike,
            earliest_exercise,
            latest_exercise,
        }
    }

    /// Call or put.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// First date exercise is allowed.
    #[inline]
    pub fn earliest_exercise(&self) -> Date {
        self.earliest_exercise
    }

    /// Last date exercise is allowed.
    #[inline]
    pub fn latest_exercise(&self) -> Date {
        self.latest_exercise
    }

    /// Immediate exercise value at `spot`.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.kind.intrinsic(spot, self.strike)
    }
}
