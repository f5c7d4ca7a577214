//! Market data for a set of scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use tessera_core::{CurrencyPair, Date, FxRate};

use crate::curve::InterpolatedCurve;
use crate::error::{MarketDataError, MarketDataResult};
use crate::ids::{CurveId, MarketDataId, VolatilitiesId};
use crate::value::{MarketDataBox, MarketDataValue};
use crate::volatility::NormalIborFutureOptionVolatilities;

/// Read-only market data indexed by scenario.
///
/// Every scenario shares the same set of identifiers; values may be shared
/// across scenarios or differ per scenario.
pub trait ScenarioMarketData: Send + Sync {
    /// Number of scenarios.
    fn scenario_count(&self) -> usize;

    /// Valuation date of a scenario.
    fn valuation_date(&self, scenario: usize) -> MarketDataResult<Date>;

    /// Looks up the boxed value for an identifier.
    fn value(&self, id: &MarketDataId) -> MarketDataResult<&MarketDataBox>;

    /// Returns true if the identifier is present.
    fn contains(&self, id: &MarketDataId) -> bool {
        self.value(id).is_ok()
    }

    /// Returns a curve for a scenario.
    fn curve(&self, id: &CurveId, scenario: usize) -> MarketDataResult<Arc<InterpolatedCurve>> {
        let key = MarketDataId::Curve(id.clone());
        self.value(&key)?.curve(&key, scenario)
    }

    /// Returns the FX rate on a pair for a scenario, inverting a rate stored
    /// on the inverse pair if needed.
    fn fx_rate(&self, pair: CurrencyPair, scenario: usize) -> MarketDataResult<FxRate> {
        let key = MarketDataId::FxRate(pair);
        if let Ok(boxed) = self.value(&key) {
            return boxed.fx_rate(&key, scenario);
        }
        let inverse = MarketDataId::FxRate(pair.inverse());
        match self.value(&inverse) {
            Ok(boxed) => Ok(boxed.fx_rate(&inverse, scenario)?.inverse()),
            Err(_) => Err(MarketDataError::not_found(key)),
        }
    }

    /// Returns normal volatilities for a scenario.
    fn normal_volatilities(
        &self,
        id: &VolatilitiesId,
        scenario: usize,
    ) -> MarketDataResult<Arc<NormalIborFutureOptionVolatilities>> {
        let key = MarketDataId::Volatilities(id.clone());
        self.value(&key)?.normal_volatilities(&key, scenario)
    }
}

/// Immutable scenario market data.
#[derive(Debug, Clone)]
pub struct ImmutableScenarioMarketData {
    scenario_count: usize,
    valuation_date: ValuationDates,
    values: HashMap<MarketDataId, MarketDataBox>,
}

#[derive(Debug, Clone)]
enum ValuationDates {
    Single(Date),
    Scenarios(Vec<Date>),
}

impl ImmutableScenarioMarketData {
    /// Starts building market data where every scenario has the same
    /// valuation date.
    #[must_use]
    pub fn builder(valuation_date: Date) -> ImmutableScenarioMarketDataBuilder {
        ImmutableScenarioMarketDataBuilder::new(ValuationDates::Single(valuation_date))
    }

    /// Starts building market data with one valuation date per scenario.
    #[must_use]
    pub fn builder_per_scenario(valuation_dates: Vec<Date>) -> ImmutableScenarioMarketDataBuilder {
        ImmutableScenarioMarketDataBuilder::new(ValuationDates::Scenarios(valuation_dates))
    }

    /// Identifiers present in the market data.
    pub fn ids(&self) -> impl Iterator<Item = &MarketDataId> {
        self.values.keys()
    }
}

impl ScenarioMarketData for ImmutableScenarioMarketData {
    fn scenario_count(&self) -> usize {
        self.scenario_count
    }

    fn valuation_date(&self, scenario: usize) -> MarketDataResult<Date> {
        if scenario >= self.scenario_count {
            return Err(MarketDataError::ScenarioOutOfRange {
                index: scenario,
                count: self.scenario_count,
            });
        }
        match &self.valuation_date {
            ValuationDates::Single(date) => Ok(*date),
            ValuationDates::Scenarios(dates) => Ok(dates[scenario]),
        }
    }

    fn value(&self, id: &MarketDataId) -> MarketDataResult<&MarketDataBox> {
        self.values
            .get(id)
            .ok_or_else(|| MarketDataError::not_found(id.clone()))
    }
}

/// Builder for [`ImmutableScenarioMarketData`].
#[derive(Debug, Clone)]
pub struct ImmutableScenarioMarketDataBuilder {
    scenario_count: Option<usize>,
    valuation_date: ValuationDates,
    values: HashMap<MarketDataId, MarketDataBox>,
}

impl ImmutableScenarioMarketDataBuilder {
    fn new(valuation_date: ValuationDates) -> Self {
        Self {
            scenario_count: None,
            valuation_date,
            values: HashMap::new(),
        }
    }

    /// Sets the scenario count explicitly.
    ///
    /// Otherwise it is taken from the per-scenario valuation dates or the
    /// first per-scenario value, and defaults to one.
    #[must_use]
    pub fn scenario_count(mut self, count: usize) -> Self {
        self.scenario_count = Some(count);
        self
    }

    /// Adds a value shared by all scenarios.
    #[must_use]
    pub fn add_value(mut self, id: impl Into<MarketDataId>, value: impl Into<MarketDataValue>) -> Self {
        self.values
            .insert(id.into(), MarketDataBox::Single(value.into()));
        self
    }

    /// Adds one value per scenario.
    #[must_use]
    pub fn add_scenario_values<V: Into<MarketDataValue>>(
        mut self,
        id: impl Into<MarketDataId>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.values.insert(id.into(), MarketDataBox::Scenarios(values));
        self
    }

    /// Adds a curve under its own name.
    #[must_use]
    pub fn add_curve(self, curve: InterpolatedCurve) -> Self {
        let id = curve.name().clone();
        self.add_value(id, curve)
    }

    /// Adds a spot FX rate under its pair.
    #[must_use]
    pub fn add_fx_rate(self, rate: FxRate) -> Self {
        self.add_value(rate.pair(), rate)
    }

    /// Adds volatilities under their own name.
    #[must_use]
    pub fn add_volatilities(self, vols: NormalIborFutureOptionVolatilities) -> Self {
        let id = vols.name().clone();
        self.add_value(id, vols)
    }

    /// Builds the market data.
    ///
    /// # Errors
    ///
    /// Fails if any per-scenario value count, or the number of valuation
    /// dates, differs from the scenario count.
    pub fn build(self) -> MarketDataResult<ImmutableScenarioMarketData> {
        let date_count = match &self.valuation_date {
            ValuationDates::Single(_) => None,
            ValuationDates::Scenarios(dates) => Some(dates.len()),
        };
        let first_box_count = self
            .values
            .values()
            .find_map(MarketDataBox::scenario_count);
        let scenario_count = self
            .scenario_count
            .or(date_count)
            .or(first_box_count)
            .unwrap_or(1);

        if scenario_count == 0 {
            return Err(MarketDataError::invalid("scenario count must be at least one"));
        }
        if let Some(count) = date_count {
            if count != scenario_count {
                return Err(MarketDataError::invalid(format!(
                    "{count} valuation dates supplied for {scenario_count} scenarios"
                )));
            }
        }
        for (id, boxed) in &self.values {
            if let Some(actual) = boxed.scenario_count() {
                if actual != scenario_count {
                    return Err(MarketDataError::ScenarioCountMismatch {
                        id: id.clone(),
                        expected: scenario_count,
                        actual,
                    });
                }
            }
        }

        debug!(
            scenario_count,
            values = self.values.len(),
            "built scenario market data"
        );
        Ok(ImmutableScenarioMarketData {
            scenario_count,
            valuation_date: self.valuation_date,
            values: self.values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tessera_core::Currency;

    fn valuation() -> Date {
        Date::from_ymd(2025, 1, 15).unwrap()
    }

    fn eur_usd() -> CurrencyPair {
        CurrencyPair::of(Currency::EUR, Currency::USD).unwrap()
    }

    #[test]
    fn test_fx_rate_inverse_lookup() {
        let md = ImmutableScenarioMarketData::builder(valuation())
            .add_fx_rate(FxRate::of(eur_usd(), 1.25).unwrap())
            .build()
            .unwrap();
        assert_eq!(md.scenario_count(), 1);
        let inverse = md.fx_rate(eur_usd().inverse(), 0).unwrap();
        assert_relative_eq!(inverse.rate(), 0.8);

        let gbp = CurrencyPair::of(Currency::GBP, Currency::USD).unwrap();
        assert_eq!(
            md.fx_rate(gbp, 0).err(),
            Some(MarketDataError::not_found(gbp))
        );
    }

    #[test]
    fn test_scenario_count_inferred_and_checked() {
        let curve = |rate| InterpolatedCurve::flat("USD-Disc", Currency::USD, valuation(), rate).unwrap();
        let md = ImmutableScenarioMarketData::builder(valuation())
            .add_scenario_values(CurveId::new("USD-Disc"), [curve(0.01), curve(0.02), curve(0.03)])
            .build()
            .unwrap();
        assert_eq!(md.scenario_count(), 3);
        let third = md.curve(&CurveId::new("USD-Disc"), 2).unwrap();
        assert_relative_eq!(third.zero_rate(1.0), 0.03);
        assert!(md.valuation_date(3).is_err());

        let mismatch = ImmutableScenarioMarketData::builder(valuation())
            .scenario_count(2)
            .add_scenario_values(CurveId::new("USD-Disc"), [curve(0.01), curve(0.02), curve(0.03)])
            .build();
        assert!(matches!(
            mismatch,
            Err(MarketDataError::ScenarioCountMismatch { expected: 2, actual: 3, .. })
        ));
    }

    #[test]
    fn test_per_scenario_valuation_dates() {
        let dates = vec![valuation(), valuation().add_days(1)];
        let md = ImmutableScenarioMarketData::builder_per_scenario(dates)
            .build()
            .unwrap();
        assert_eq!(md.scenario_count(), 2);
        assert_eq!(md.valuation_date(1).unwrap(), valuation().add_days(1));

        let bad = ImmutableScenarioMarketData::builder_per_scenario(vec![valuation()])
            .scenario_count(2)
            .build();
        assert!(bad.is_err());
    }

    #[test]
    fn test_missing_and_contains() {
        let md = ImmutableScenarioMarketData::builder(valuation()).build().unwrap();
        let id = CurveId::new("EUR-Disc");
        assert!(!md.contains(&MarketDataId::Curve(id.clone())));
        assert_eq!(
            md.curve(&id, 0).err(),
            Some(MarketDataError::not_found(id))
        );
    }
}
