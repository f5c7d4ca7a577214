//! Node interpolation shared by curves and volatilities.

use crate::error::{MarketDataError, MarketDataResult};

/// Checks that nodes are non-empty, finite, strictly increasing and paired
/// with finite values.
pub(crate) fn validate_nodes(xs: &[f64], ys: &[f64]) -> MarketDataResult<()> {
    if xs.is_empty() {
        return Err(MarketDataError::invalid("at least one node is required"));
    }
    if xs.len() != ys.len() {
        return Err(MarketDataError::invalid(format!(
            "node times and values must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if let Some(bad) = xs.iter().chain(ys).find(|v| !v.is_finite()) {
        return Err(MarketDataError::invalid(format!("non-finite node value {bad}")));
    }
    for (index, pair) in xs.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(MarketDataError::invalid(format!(
                "node times must be strictly increasing at index {}: {:.4} >= {:.4}",
                index + 1,
                pair[0],
                pair[1]
            )));
        }
    }
    Ok(())
}

/// Linear interpolation with flat extrapolation at both ends.
///
/// Assumes nodes passed [`validate_nodes`].
pub(crate) fn linear_flat(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    let upper = xs.partition_point(|node| *node < x);
    let lower = upper - 1;
    let weight = (x - xs[lower]) / (xs[upper] - xs[lower]);
    ys[lower] + weight * (ys[upper] - ys[lower])
}
