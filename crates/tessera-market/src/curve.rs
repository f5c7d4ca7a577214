//! Interpolated zero rate curve.

use serde::{Deserialize, Serialize};

use tessera_core::daycounts::{Act365Fixed, DayCount};
use tessera_core::{Currency, Date};

use crate::error::{MarketDataError, MarketDataResult};
use crate::ids::CurveId;
use crate::interpolation::{linear_flat, validate_nodes};

/// One basis point.
pub const ONE_BASIS_POINT: f64 = 1.0e-4;

/// A curve of continuously compounded zero rates.
///
/// Node times are ACT/365F year fractions from the valuation date. Rates are
/// interpolated linearly between nodes and held flat outside them.
///
/// ```rust
/// use tessera_core::{Currency, Date};
/// use tessera_market::curve::InterpolatedCurve;
///
/// let valuation = Date::from_ymd(2025, 1, 15).unwrap();
/// let curve = InterpolatedCurve::new(
///     "USD-Disc",
///     Currency::USD,
///     valuation,
///     vec![0.5, 1.0, 2.0],
///     vec![0.040, 0.042, 0.045],
/// )
/// .unwrap();
/// assert!((curve.zero_rate(0.75) - 0.041).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedCurve {
    name: CurveId,
    currency: Currency,
    valuation_date: Date,
    times: Vec<f64>,
    zero_rates: Vec<f64>,
}

impl InterpolatedCurve {
    /// Creates a curve from node times and zero rates.
    ///
    /// # Errors
    ///
    /// Fails if there are no nodes, the times are not strictly increasing,
    /// the lengths differ or any value is not finite.
    pub fn new(
        name: impl Into<CurveId>,
        currency: Currency,
        valuation_date: Date,
        times: Vec<f64>,
        zero_rates: Vec<f64>,
    ) -> MarketDataResult<Self> {
        validate_nodes(&times, &zero_rates)?;
        Ok(Self {
            name: name.into(),
            currency,
            valuation_date,
            times,
            zero_rates,
        })
    }

    /// Creates a curve with nodes at the given dates.
    ///
    /// # Errors
    ///
    /// As [`InterpolatedCurve::new`]; dates on or before the valuation date
    /// produce non-increasing times and are rejected.
    pub fn from_dates(
        name: impl Into<CurveId>,
        currency: Currency,
        valuation_date: Date,
        dates: &[Date],
        zero_rates: Vec<f64>,
    ) -> MarketDataResult<Self> {
        let times = dates
            .iter()
            .map(|date| Act365Fixed.year_fraction(valuation_date, *date))
            .collect::<Vec<_>>();
        if let Some(first) = times.first() {
            if *first <= 0.0 {
                return Err(MarketDataError::invalid(format!(
                    "first node date must be after valuation date {valuation_date}"
                )));
            }
        }
        Self::new(name, currency, valuation_date, times, zero_rates)
    }

    /// A curve with a single flat rate.
    ///
    /// # Errors
    ///
    /// Fails if the rate is not finite.
    pub fn flat(
        name: impl Into<CurveId>,
        currency: Currency,
        valuation_date: Date,
        rate: f64,
    ) -> MarketDataResult<Self> {
        Self::new(name, currency, valuation_date, vec![1.0], vec![rate])
    }

    /// Returns the curve name.
    #[must_use]
    pub fn name(&self) -> &CurveId {
        &self.name
    }

    /// Returns the currency of the curve.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the node zero rates.
    #[must_use]
    pub fn zero_rates(&self) -> &[f64] {
        &self.zero_rates
    }

    /// Number of curve parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.times.len()
    }

    /// Year fraction from the valuation date.
    #[must_use]
    pub fn relative_time(&self, date: Date) -> f64 {
        Act365Fixed.year_fraction(self.valuation_date, date)
    }

    /// Interpolated zero rate at time `t`.
    #[must_use]
    pub fn zero_rate(&self, t: f64) -> f64 {
        linear_flat(&self.times, &self.zero_rates, t)
    }

    /// Discount factor at time `t`.
    #[must_use]
    pub fn discount_factor(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        (-self.zero_rate(t) * t).exp()
    }

    /// Discount factor at a date.
    #[must_use]
    pub fn discount_factor_at(&self, date: Date) -> f64 {
        self.discount_factor(self.relative_time(date))
    }

    /// Simply compounded forward rate between two dates.
    ///
    /// # Errors
    ///
    /// Fails if the accrual factor is not positive.
    pub fn simple_forward_rate(
        &self,
        start: Date,
        end: Date,
        accrual_factor: f64,
    ) -> MarketDataResult<f64> {
        if accrual_factor <= 0.0 {
            return Err(MarketDataError::invalid(format!(
                "accrual factor must be positive, found {accrual_factor} for {start} to {end}"
            )));
        }
        let df_start = self.discount_factor_at(start);
        let df_end = self.discount_factor_at(end);
        Ok((df_start / df_end - 1.0) / accrual_factor)
    }

    /// Returns a copy with one node rate shifted.
    ///
    /// # Errors
    ///
    /// Fails if the node index is out of range.
    pub fn with_node_shifted(&self, node: usize, shift: f64) -> MarketDataResult<Self> {
        if node >= self.zero_rates.len() {
            return Err(MarketDataError::invalid(format!(
                "node {node} out of range for curve {} with {} nodes",
                self.name,
                self.zero_rates.len()
            )));
        }
        let mut shifted = self.clone();
        shifted.zero_rates[node] += shift;
        Ok(shifted)
    }

    /// Returns a copy with every node rate shifted by the same amount.
    #[must_use]
    pub fn with_parallel_shift(&self, shift: f64) -> Self {
        let mut shifted = self.clone();
        shifted.zero_rates.iter_mut().for_each(|rate| *rate += shift);
        shifted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn valuation() -> Date {
        Date::from_ymd(2025, 1, 15).unwrap()
    }

    fn curve() -> InterpolatedCurve {
        InterpolatedCurve::new(
            "USD-Disc",
            Currency::USD,
            valuation(),
            vec![0.5, 1.0, 2.0],
            vec![0.040, 0.042, 0.045],
        )
        .unwrap()
    }

    #[test]
    fn test_discount_factor() {
        let c = curve();
        assert_relative_eq!(c.discount_factor(0.0), 1.0);
        assert_relative_eq!(c.discount_factor(1.0), (-0.042_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(c.discount_factor(3.0), (-0.045_f64 * 3.0).exp(), epsilon = 1e-15);
        assert_relative_eq!(c.discount_factor_at(valuation()), 1.0);
    }

    #[test]
    fn test_forward_rate_consistent_with_discount_factors() {
        let c = curve();
        let start = Date::from_ymd(2025, 4, 15).unwrap();
        let end = Date::from_ymd(2025, 7, 15).unwrap();
        let accrual = 0.25;
        let fwd = c.simple_forward_rate(start, end, accrual).unwrap();
        let expected = (c.discount_factor_at(start) / c.discount_factor_at(end) - 1.0) / accrual;
        assert_relative_eq!(fwd, expected, epsilon = 1e-15);
        assert!(fwd > 0.0);
        assert!(c.simple_forward_rate(start, end, 0.0).is_err());
    }

    #[test]
    fn test_shifts() {
        let c = curve();
        let bumped = c.with_node_shifted(1, ONE_BASIS_POINT).unwrap();
        assert_relative_eq!(bumped.zero_rates()[1], 0.0421, epsilon = 1e-15);
        assert_relative_eq!(bumped.zero_rates()[0], 0.040);
        assert!(c.with_node_shifted(3, ONE_BASIS_POINT).is_err());

        let parallel = c.with_parallel_shift(0.01);
        assert_relative_eq!(parallel.zero_rate(0.75), c.zero_rate(0.75) + 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_from_dates() {
        let dates = [
            Date::from_ymd(2026, 1, 15).unwrap(),
            Date::from_ymd(2027, 1, 15).unwrap(),
        ];
        let c = InterpolatedCurve::from_dates("EUR-Disc", Currency::EUR, valuation(), &dates, vec![0.02, 0.025])
            .unwrap();
        assert_relative_eq!(c.times()[0], 1.0);
        assert_eq!(c.parameter_count(), 2);

        let bad = InterpolatedCurve::from_dates("EUR-Disc", Currency::EUR, valuation(), &[valuation()], vec![0.02]);
        assert!(bad.is_err());
    }
}
