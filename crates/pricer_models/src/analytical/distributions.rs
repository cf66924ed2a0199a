//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Cumulative distribution function (CDF), double precision
//! - `norm_pdf`: Probability density function (PDF)
//!
//! Both are generic over `T: Float`.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Numerator coefficients of Hart's rational approximation (highest order first).
const HART_P: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

/// Denominator coefficients of Hart's rational approximation (highest order first).
const HART_Q: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

/// Lifts an `f64` literal into `T`.
#[inline]
pub(crate) fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

#[inline]
fn horner<T: Float>(coefficients: &[f64], x: T) -> T {
    coefficients
        .iter()
        .fold(T::zero(), |acc, &c| acc * x + lit(c))
}

/// Standard normal cumulative distribution function.
///
/// Hart's double precision algorithm (as popularised by West, 2005): a
/// rational approximation for |x| < 7.07 and a continued fraction in the
/// tail. Accurate to roughly double precision over the real line.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0_f64) - 0.841_344_746_068_543).abs() < 1e-12);
/// assert!(norm_cdf(-40.0_f64) == 0.0);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let x_abs = x.abs();

    let tail = if !(x_abs <= lit(37.0)) {
        T::zero()
    } else {
        let exponential = (-x_abs * x_abs * lit(0.5)).exp();
        if x_abs < lit(7.071_067_811_865_47) {
            exponential * horner(&HART_P, x_abs) / horner(&HART_Q, x_abs)
        } else {
            let mut build = x_abs + lit(0.65);
            build = x_abs + lit::<T>(4.0) / build;
            build = x_abs + lit::<T>(3.0) / build;
            build = x_abs + lit::<T>(2.0) / build;
            build = x_abs + T::one() / build;
            exponential / build / lit(SQRT_2PI)
        }
    };

    if x.is_nan() {
        x
    } else if x > T::zero() {
        T::one() - tail
    } else {
        tail
    }
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-10);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    lit::<T>(FRAC_1_SQRT_2PI) * (lit::<T>(-0.5) * x * x).exp()
}
