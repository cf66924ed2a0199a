//! Linear interpolation implementation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Two constructors: [`new`](Self::new) copies and sorts arbitrary points,
/// [`from_sorted`](Self::from_sorted) takes ownership of an already
/// increasing grid (such as a finite-difference mesh) without copying.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[3.0_f64, 0.0, 1.0, 2.0], &[6.0, 0.0, 2.0, 4.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 3.0));
/// assert!((interp.interpolate(1.5).unwrap() - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct from unsorted points; the pairs are sorted by x.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InvalidInput` - mismatched lengths
    /// * `InterpolationError::InsufficientData` - fewer than 2 points
    /// * `InterpolationError::NonMonotonicData` - duplicate abscissae
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        Self::check_lengths(xs.len(), ys.len())?;

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let (sorted_xs, sorted_ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        Self::from_sorted(sorted_xs, sorted_ys)
    }

    /// Construct from strictly increasing abscissae, taking ownership.
    ///
    /// ```
    /// use pricer_core::math::interpolators::LinearInterpolator;
    ///
    /// assert!(LinearInterpolator::from_sorted(vec![0.0, 1.0], vec![5.0, 6.0]).is_ok());
    /// assert!(LinearInterpolator::from_sorted(vec![1.0, 0.0], vec![5.0, 6.0]).is_err());
    /// ```
    pub fn from_sorted(xs: Vec<T>, ys: Vec<T>) -> Result<Self, InterpolationError> {
        Self::check_lengths(xs.len(), ys.len())?;
        if let Some(index) = xs.windows(2).position(|w| !(w[0] < w[1])) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }
        Ok(Self { xs, ys })
    }

    fn check_lengths(nx: usize, ny: usize) -> Result<(), InterpolationError> {
        if nx != ny {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                nx, ny
            )));
        }
        if nx < 2 {
            return Err(InterpolationError::InsufficientData { got: nx, need: 2 });
        }
        Ok(())
    }

    /// Sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// y-values in sorted x order.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Index `i` with `xs[i] <= x < xs[i+1]`, clamped to [0, n-2].
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if !(x >= x_min && x <= x_max) {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let t = (x - x0) / (x1 - x0);
        Ok(y0 + (y1 - y0) * t)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // Construction
    // ========================================

    #[test]
    fn test_new_insufficient_data() {
        match LinearInterpolator::<f64>::new(&[1.0], &[2.0]).unwrap_err() {
            InterpolationError::InsufficientData { got, need } => {
                assert_eq!(got, 1);
                assert_eq!(need, 2);
            }
            _ => panic!("Expected InsufficientData error"),
        }
    }

    #[test]
    fn test_new_mismatched_lengths() {
        match LinearInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap_err() {
            InterpolationError::InvalidInput(msg) => assert!(msg.contains("same length")),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_new_sorts_pairs() {
        let interp = LinearInterpolator::new(&[3.0, 1.0, 2.0, 0.0], &[9.0, 1.0, 4.0, 0.0]).unwrap();
        assert_eq!(interp.xs(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(interp.ys(), &[0.0, 1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_new_rejects_duplicate_x() {
        assert!(matches!(
            LinearInterpolator::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]),
            Err(InterpolationError::NonMonotonicData { index: 2 })
        ));
    }

    // ========================================
    // Interpolation
    // ========================================

    #[test]
    fn test_knots_are_exact() {
        let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
        assert_eq!(interp.interpolate(0.0).unwrap(), 0.0);
        assert_eq!(interp.interpolate(1.0).unwrap(), 2.0);
        assert_eq!(interp.interpolate(2.0).unwrap(), 4.0);
    }

    #[test]
    fn test_midpoint() {
        let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_bounds() {
        let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(matches!(
            interp.interpolate(1.5),
            Err(InterpolationError::OutOfBounds { .. })
        ));
        assert!(interp.interpolate(f64::NAN).is_err());
    }

    #[test]
    fn test_uniform_log_grid() {
        let xs: Vec<f64> = (0..=10).map(|i| (i as f64) * 0.1).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 1.0).collect();
        let interp = LinearInterpolator::from_sorted(xs, ys).unwrap();
        assert_relative_eq!(interp.interpolate(0.437).unwrap(), 2.311, epsilon = 1e-12);
    }
}
