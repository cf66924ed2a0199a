//! Axis generation for the sensitivity table.
//!
//! Step sizes come from ascending `(upper bound, step)` bands: the first
//! band whose bound is at least the requested total wins. Both axes end
//! exactly at the requested total, so a total that is not a multiple of the
//! step still appears as the last point.

use pricer_models::ScenarioParameters;

use crate::error::GridConfigurationError;

/// Holding-day bands, upper bound inclusive.
pub const DAY_BANDS: [(u32, u32); 5] = [(10, 1), (30, 2), (50, 5), (100, 10), (200, 20)];

/// Spot-move bands in percent, upper bound inclusive.
pub const MOVE_BANDS: [(u32, u32); 4] = [(10, 1), (30, 2), (50, 5), (100, 10)];

/// Whole-week holding periods are stepped weekly.
pub const WEEK: u32 = 7;

fn band_step(total: u32, bands: &[(u32, u32)]) -> Option<u32> {
    bands
        .iter()
        .find(|(upper, _)| total <= *upper)
        .map(|&(_, step)| step)
}

/// Step between consecutive day columns.
///
/// # Errors
/// `GridConfigurationError::DaysOutOfRange` above 200 days unless the total
/// is a multiple of seven.
pub fn days_step(total: u32) -> Result<u32, GridConfigurationError> {
    if total % WEEK == 0 {
        return Ok(WEEK);
    }
    band_step(total, &DAY_BANDS).ok_or(GridConfigurationError::DaysOutOfRange { days: total })
}

/// Day columns `0, step, 2·step, …, total`.
///
/// # Examples
/// ```
/// use pricer_risk::grid::days_axis;
///
/// assert_eq!(days_axis(5).unwrap(), vec![0, 1, 2, 3, 4, 5]);
/// assert_eq!(days_axis(14).unwrap(), vec![0, 7, 14]);
/// assert_eq!(days_axis(25).unwrap().last(), Some(&25));
/// ```
///
/// # Errors
/// See [`days_step`].
pub fn days_axis(total: u32) -> Result<Vec<u32>, GridConfigurationError> {
    let step = days_step(total)?;
    let mut axis: Vec<u32> = (0..total).step_by(step as usize).collect();
    axis.push(total);
    Ok(axis)
}

/// Move magnitude in whole percent, `round(|fraction| × 100)`.
///
/// # Errors
/// `GridConfigurationError::NonFiniteMove` for NaN or infinite input.
pub fn move_percent(fraction: f64) -> Result<u64, GridConfigurationError> {
    if !fraction.is_finite() {
        return Err(GridConfigurationError::NonFiniteMove { fraction });
    }
    // Saturating cast; anything this large is rejected by the bands anyway
    Ok((fraction.abs() * 100.0).round() as u64)
}

/// Move rows in percent, symmetric around zero and strictly increasing.
///
/// The axis steps uniformly from `-f` to `f` when the span `2f` is a whole
/// number of steps. Otherwise it holds `±f` and the step multiples strictly
/// between them.
///
/// # Examples
/// ```
/// use pricer_risk::grid::move_axis;
///
/// assert_eq!(move_axis(0.05).unwrap(), vec![-5, -4, -3, -2, -1, 0, 1, 2, 3, 4, 5]);
/// assert_eq!(move_axis(0.15).unwrap()[..3], [-15, -13, -11]);
/// assert_eq!(move_axis(0.0).unwrap(), vec![0]);
/// ```
///
/// # Errors
/// - `GridConfigurationError::NonFiniteMove` for NaN or infinite input
/// - `GridConfigurationError::MoveOutOfRange` above 100%
pub fn move_axis(fraction: f64) -> Result<Vec<i32>, GridConfigurationError> {
    let percent = move_percent(fraction)?;
    let limit = u32::try_from(percent)
        .ok()
        .filter(|&p| p <= MOVE_BANDS[MOVE_BANDS.len() - 1].0)
        .ok_or(GridConfigurationError::MoveOutOfRange { percent })?;
    if limit == 0 {
        return Ok(vec![0]);
    }

    let step = band_step(limit, &MOVE_BANDS).ok_or(GridConfigurationError::MoveOutOfRange { percent })?;
    let f = limit as i32;
    let s = step as i32;

    if (2 * f) % s == 0 {
        return Ok((-f..=f).step_by(step as usize).collect());
    }

    let mut axis = vec![-f];
    // First multiple of the step strictly above -f
    let mut m = (-f).div_euclid(s) * s + s;
    while m < f {
        axis.push(m);
        m += s;
    }
    axis.push(f);
    Ok(axis)
}

/// Both axes of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridAxes {
    /// Spot moves in percent (rows)
    pub moves: Vec<i32>,
    /// Holding days (columns)
    pub days: Vec<u32>,
}

impl GridAxes {
    /// Axes spanned by a scenario's holding period and spot move.
    ///
    /// # Errors
    /// Any [`GridConfigurationError`] from either axis.
    pub fn for_scenario(scenario: &ScenarioParameters) -> Result<Self, GridConfigurationError> {
        Ok(Self {
            moves: move_axis(scenario.spot_move_fraction)?,
            days: days_axis(scenario.days_held)?,
        })
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.moves.len() * self.days.len()
    }

    /// True when there are no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==========================================================
    // Days
    // ==========================================================

    #[test]
    fn test_days_step_bands() {
        assert_eq!(days_step(0).unwrap(), 7);
        assert_eq!(days_step(10).unwrap(), 1);
        assert_eq!(days_step(11).unwrap(), 2);
        assert_eq!(days_step(30).unwrap(), 2);
        assert_eq!(days_step(49).unwrap(), 7);
        assert_eq!(days_step(50).unwrap(), 5);
        assert_eq!(days_step(99).unwrap(), 10);
        assert_eq!(days_step(200).unwrap(), 20);
        assert_eq!(days_step(203).unwrap(), 7);
        assert!(matches!(
            days_step(201),
            Err(GridConfigurationError::DaysOutOfRange { days: 201 })
        ));
    }

    #[test]
    fn test_days_axis_thirty() {
        let axis = days_axis(30).unwrap();
        assert_eq!(axis, (0..=30).step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn test_days_axis_uneven_total() {
        assert_eq!(days_axis(25).unwrap(), vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24, 25]);
        assert_eq!(days_axis(55).unwrap(), vec![0, 10, 20, 30, 40, 50, 55]);
    }

    #[test]
    fn test_days_axis_zero() {
        assert_eq!(days_axis(0).unwrap(), vec![0]);
    }

    // ==========================================================
    // Moves
    // ==========================================================

    #[test]
    fn test_move_axis_odd_limit_steps_from_edge() {
        let axis = move_axis(0.25).unwrap();
        assert_eq!(axis, (-25..=25).step_by(2).collect::<Vec<_>>());
        assert!(!axis.contains(&0));

        let axis = move_axis(0.15).unwrap();
        assert_eq!(axis[..3], [-15, -13, -11]);
        assert_eq!(axis.last(), Some(&15));
        assert!(axis.windows(2).all(|w| w[1] - w[0] == 2));
    }

    #[test]
    fn test_move_axis_limit_off_step_keeps_edges() {
        // 37 is not reachable from -37 in steps of 5
        let axis = move_axis(0.37).unwrap();
        assert_eq!(axis.first(), Some(&-37));
        assert_eq!(axis[1], -35);
        assert_eq!(axis[axis.len() - 2], 35);
        assert_eq!(axis.last(), Some(&37));
        assert!(axis.contains(&0));
    }

    #[test]
    fn test_move_axis_sign_ignored() {
        assert_eq!(move_axis(-0.05).unwrap(), move_axis(0.05).unwrap());
    }

    #[test]
    fn test_move_axis_full_range() {
        let axis = move_axis(1.0).unwrap();
        assert_eq!(axis, (-10..=10).map(|m| m * 10).collect::<Vec<_>>());
    }

    #[test]
    fn test_move_axis_rejects() {
        assert!(matches!(
            move_axis(1.01),
            Err(GridConfigurationError::MoveOutOfRange { percent: 101 })
        ));
        assert!(matches!(
            move_axis(f64::NAN),
            Err(GridConfigurationError::NonFiniteMove { .. })
        ));
        assert!(matches!(
            move_axis(f64::INFINITY),
            Err(GridConfigurationError::NonFiniteMove { .. })
        ));
        assert!(matches!(
            move_axis(1e300),
            Err(GridConfigurationError::MoveOutOfRange { .. })
        ));
    }

    // ==========================================================
    // Axis invariants
    // ==========================================================

    proptest! {
        #[test]
        fn prop_days_axis_shape(total in 0u32..=200) {
            let axis = days_axis(total).unwrap();
            prop_assert_eq!(axis[0], 0);
            prop_assert_eq!(*axis.last().unwrap(), total);
            prop_assert!(axis.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_move_axis_shape(fraction in -1.0f64..=1.0) {
            let axis = move_axis(fraction).unwrap();
            let f = (fraction.abs() * 100.0).round() as i32;
            prop_assert_eq!(axis[0], -f);
            prop_assert_eq!(*axis.last().unwrap(), f);
            prop_assert!(axis.windows(2).all(|w| w[0] < w[1]));
            let mirrored: Vec<i32> = axis.iter().rev().map(|m| -m).collect();
            prop_assert_eq!(&mirrored, &axis);
            if f > 0 {
                let step = band_step(f as u32, &MOVE_BANDS).unwrap() as i32;
                if (2 * f) % step == 0 {
                    prop_assert!(axis.windows(2).all(|w| w[1] - w[0] == step));
                }
            }
        }
    }
}
