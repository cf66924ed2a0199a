//! Interpolator trait definition.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolator over a closed domain.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`.
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBounds` if `x` lies outside [`domain`](Self::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Valid range `(x_min, x_max)`.
    fn domain(&self) -> (T, T);
}
