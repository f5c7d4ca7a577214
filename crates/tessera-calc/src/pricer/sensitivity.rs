//! Bump-and-reprice curve sensitivities.

use std::collections::BTreeSet;

use tessera_core::{Currency, MultiCurrencyAmount};
use tessera_market::curve::ONE_BASIS_POINT;
use tessera_market::ids::CurveId;
use tessera_market::sensitivity::{CurrencyParameterSensitivities, CurrencyParameterSensitivity};

use crate::error::{CalcError, CalcResult};
use crate::lookup::RatesProvider;

/// PV01 to every node of the given curves.
///
/// Each node is shifted up by one basis point on its own and the value
/// recomputed; the sensitivity is the change in value. A curve used both
/// for discounting and forwarding is shifted in both roles at once.
///
/// # Errors
///
/// Fails if a curve is not held by the provider or the valuation fails.
pub fn bucketed_pv01<F>(
    provider: &RatesProvider,
    curves: &BTreeSet<CurveId>,
    currency: Currency,
    present_value: F,
) -> CalcResult<CurrencyParameterSensitivities>
where
    F: Fn(&RatesProvider) -> CalcResult<f64>,
{
    let base = present_value(provider)?;
    let mut sensitivities = Vec::with_capacity(curves.len());
    for curve in curves {
        let count = provider
            .parameter_count(curve)
            .ok_or_else(|| CalcError::missing_market_data(curve.clone()))?;
        let sensitivity = (0..count)
            .map(|node| {
                let bumped = provider.with_curve_node_shifted(curve, node, ONE_BASIS_POINT)?;
                Ok(present_value(&bumped)? - base)
            })
            .collect::<CalcResult<Vec<_>>>()?;
        sensitivities.push(CurrencyParameterSensitivity {
            curve: curve.clone(),
            currency,
            sensitivity,
        });
    }
    Ok(CurrencyParameterSensitivities::of(sensitivities))
}

/// Sum of all bucketed sensitivities, per currency.
#[must_use]
pub fn total_pv01(sensitivities: &CurrencyParameterSensitivities) -> MultiCurrencyAmount {
    sensitivities
        .sensitivities()
        .iter()
        .fold(MultiCurrencyAmount::empty(), |total, s| total.plus(s.total()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tessera_core::Date;
    use tessera_market::curve::InterpolatedCurve;
    use tessera_market::scenario::ImmutableScenarioMarketData;

    use crate::lookup::{DefaultRatesMarketDataLookup, RatesMarketDataLookup};

    fn provider() -> RatesProvider {
        let date = Date::from_ymd(2025, 1, 15).unwrap();
        let md = ImmutableScenarioMarketData::builder(date)
            .add_curve(
                InterpolatedCurve::new("USD-Disc", Currency::USD, date, vec![1.0, 2.0, 5.0], vec![0.03, 0.035, 0.04])
                    .unwrap(),
            )
            .build()
            .unwrap();
        let lookup = DefaultRatesMarketDataLookup::of([(Currency::USD, CurveId::new("USD-Disc"))], []);
        lookup.market_data_view(&md).unwrap().scenario(0).unwrap().clone()
    }

    #[test]
    fn test_buckets_sum_to_total() {
        let provider = provider();
        let maturity = Date::from_ymd(2027, 1, 15).unwrap();
        let pv = |p: &RatesProvider| -> CalcResult<f64> {
            Ok(-1_000_000.0 * p.discount_factor(Currency::USD, maturity)?)
        };
        let curves = BTreeSet::from([CurveId::new("USD-Disc")]);
        let sens = bucketed_pv01(&provider, &curves, Currency::USD, pv).unwrap();

        let buckets = &sens.find(&CurveId::new("USD-Disc")).unwrap().sensitivity;
        assert_eq!(buckets.len(), 3);
        // two years sits on the second node
        assert!(buckets[0].abs() < 1e-9);
        assert!(buckets[1] > 0.0);
        assert!(buckets[2].abs() < 1e-9);

        let total = total_pv01(&sens);
        assert_relative_eq!(total.amount(Currency::USD), buckets.iter().sum::<f64>(), epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_curve_fails() {
        let curves = BTreeSet::from([CurveId::new("EUR-Disc")]);
        let err = bucketed_pv01(&provider(), &curves, Currency::USD, |_| Ok(0.0)).unwrap_err();
        assert_eq!(err.failure_reason(), crate::result::FailureReason::MissingData);
    }
}
