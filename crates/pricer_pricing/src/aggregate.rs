//! Fan-in of engine outcomes into a single price estimate.

use tracing::warn;

use crate::error::{EngineError, EstimateError};

/// Price produced by one engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineResult {
    /// Engine display name
    pub engine: String,
    /// Present value
    pub price: f64,
}

/// Engine excluded from the mean.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineFailure {
    /// Engine display name
    pub engine: String,
    /// Rendered error
    pub reason: String,
}

/// Arithmetic mean over the engines that succeeded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceEstimate {
    price: f64,
    results: Vec<EngineResult>,
    failures: Vec<EngineFailure>,
}

impl PriceEstimate {
    /// Unrounded mean price.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Mean price rounded to cents.
    #[inline]
    pub fn rounded(&self) -> f64 {
        round_cents(self.price)
    }

    /// Contributing engine prices in evaluation order.
    #[inline]
    pub fn results(&self) -> &[EngineResult] {
        &self.results
    }

    /// Engines that failed, in evaluation order.
    #[inline]
    pub fn failures(&self) -> &[EngineFailure] {
        &self.failures
    }

    /// Smallest and largest contributing price.
    pub fn range(&self) -> (f64, f64) {
        self.results
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r.price), hi.max(r.price))
            })
    }
}

/// Rounds half away from zero to two decimals.
///
/// # Examples
/// ```
/// use pricer_pricing::aggregate::round_cents;
///
/// assert_eq!(round_cents(3.9601), 3.96);
/// assert_eq!(round_cents(-1.235), -1.24);
/// ```
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Averages successful outcomes and records the failures.
///
/// Outcomes are `(engine name, result)` pairs in evaluation order.
///
/// # Errors
/// `EstimateError::NoEnginesAvailable` when no outcome is `Ok`.
///
/// # Examples
/// ```
/// use pricer_pricing::aggregate::aggregate;
/// use pricer_pricing::EngineError;
///
/// let estimate = aggregate(vec![
///     ("a", Ok(4.0)),
///     ("b", Err(EngineError::NonFinite { engine: "b" })),
///     ("c", Ok(5.0)),
/// ])
/// .unwrap();
/// assert_eq!(estimate.price(), 4.5);
/// assert_eq!(estimate.failures().len(), 1);
/// ```
pub fn aggregate<I>(outcomes: I) -> Result<PriceEstimate, EstimateError>
where
    I: IntoIterator<Item = (&'static str, Result<f64, EngineError>)>,
{
    let mut results = Vec::new();
    let mut failures = Vec::new();

    for (engine, outcome) in outcomes {
        match outcome {
            Ok(price) => results.push(EngineResult {
                engine: engine.to_string(),
                price,
            }),
            Err(err) => {
                warn!(engine, error = %err, "engine excluded from estimate");
                failures.push(EngineFailure {
                    engine: engine.to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    if results.is_empty() {
        return Err(EstimateError::NoEnginesAvailable {
            failed: failures.len(),
        });
    }

    let sum: f64 = results.iter().map(|r| r.price).sum();
    let price = sum / results.len() as f64;

    Ok(PriceEstimate {
        price,
        results,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_mean_of_successes() {
        let estimate = aggregate(vec![("a", Ok(1.0)), ("b", Ok(2.0)), ("c", Ok(6.0))]).unwrap();
        assert_relative_eq!(estimate.price(), 3.0, epsilon = 1e-15);
        assert_eq!(estimate.results().len(), 3);
        assert!(estimate.failures().is_empty());
        assert_eq!(estimate.range(), (1.0, 6.0));
    }

    #[test]
    fn test_failures_are_reported_not_averaged() {
        let estimate = aggregate(vec![
            ("Binomial Tian", Err(EngineError::InvalidProbability { scheme: "Binomial Tian", probability: 1.5 })),
            ("Finite differences", Ok(3.0)),
        ])
        .unwrap();
        assert_eq!(estimate.price(), 3.0);
        assert_eq!(estimate.failures()[0].engine, "Binomial Tian");
        assert!(estimate.failures()[0].reason.contains("1.5"));
    }

    #[test]
    fn test_all_failed() {
        let err = aggregate(vec![
            ("a", Err(EngineError::NonFinite { engine: "a" })),
            ("b", Err(EngineError::NonFinite { engine: "b" })),
        ])
        .unwrap_err();
        assert_eq!(err, EstimateError::NoEnginesAvailable { failed: 2 });
    }

    #[test]
    fn test_empty_input() {
        let err = aggregate(Vec::new()).unwrap_err();
        assert_eq!(err, EstimateError::NoEnginesAvailable { failed: 0 });
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(3.96031), 3.96);
        assert_eq!(round_cents(3.965001), 3.97);
        assert_eq!(round_cents(0.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_mean_within_bounds(prices in prop::collection::vec(0.0f64..1000.0, 1..12)) {
            let outcomes: Vec<_> = prices.iter().map(|&p| ("engine", Ok(p))).collect();
            let estimate = aggregate(outcomes).unwrap();
            let (lo, hi) = estimate.range();
            prop_assert!(estimate.price() >= lo - 1e-9);
            prop_assert!(estimate.price() <= hi + 1e-9);
        }
    }
}
