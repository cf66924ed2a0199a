//! Option right (call or put).

use num_traits::Float;
use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Right conveyed by a vanilla option.
///
/// Parsed once at the input boundary (case-insensitive `"call"` / `"put"`)
/// and carried unchanged through every engine.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionKind;
///
/// let kind: OptionKind = "PUT".parse().unwrap();
/// assert_eq!(kind, OptionKind::Put);
/// assert_eq!(kind.intrinsic(15.5_f64, 20.0), 4.5);
/// assert_eq!(OptionKind::Call.intrinsic(15.5_f64, 20.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Right to buy: max(S - K, 0)
    Call,
    /// Right to sell: max(K - S, 0)
    Put,
}

impl OptionKind {
    /// Immediate exercise value at `spot` for strike `strike`.
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionKind::Call => (spot - strike).max(T::zero()),
            OptionKind::Put => (strike - spot).max(T::zero()),
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

impl FromStr for OptionKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionKind::Call),
            "put" => Ok(OptionKind::Put),
            _ => Err(PricingError::InvalidInput(format!(
                "unknown option kind '{}', expected 'call' or 'put'",
                s
            ))),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
