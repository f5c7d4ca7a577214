//! Rates market data lookup: discount curves, forward curves and FX rates.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use tessera_core::index::IborIndex;
use tessera_core::{Currency, CurrencyPair, Date, FxRate};
use tessera_market::curve::InterpolatedCurve;
use tessera_market::ids::CurveId;
use tessera_market::requirements::MarketDataRequirements;
use tessera_market::scenario::ScenarioMarketData;

use super::optional;
use crate::error::{CalcError, CalcResult};
use crate::parameters::CalculationParameter;

/// Translates currencies and indices into rates market data.
///
/// A lookup is supplied through the calculation parameters, so the caller
/// chooses which curves are used to price a target.
pub trait RatesMarketDataLookup: Send + Sync + fmt::Debug {
    /// Name of the discount curve for a currency.
    fn discount_curve_id(&self, currency: Currency) -> Option<&CurveId>;

    /// Name of the forward curve for an index.
    fn forward_curve_id(&self, index: IborIndex) -> Option<&CurveId>;

    /// Currencies with a discount curve.
    fn discount_currencies(&self) -> BTreeSet<Currency>;

    /// Indices with a forward curve.
    fn forward_indices(&self) -> BTreeSet<IborIndex>;

    /// Market data needed to price in the given currencies and indices.
    ///
    /// Every currency needs a discount curve, every index a forward curve,
    /// and every pair of currencies an FX rate.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if a currency or index has no curve
    /// configured.
    fn requirements(
        &self,
        currencies: &BTreeSet<Currency>,
        indices: &BTreeSet<IborIndex>,
    ) -> CalcResult<MarketDataRequirements> {
        let mut curves = Vec::with_capacity(currencies.len() + indices.len());
        for currency in currencies {
            let id = self.discount_curve_id(*currency).ok_or_else(|| {
                CalcError::invalid_config(format!(
                    "Rates lookup has no discount curve for {currency}"
                ))
            })?;
            curves.push(id.clone());
        }
        for index in indices {
            let id = self.forward_curve_id(*index).ok_or_else(|| {
                CalcError::invalid_config(format!("Rates lookup has no forward curve for {index}"))
            })?;
            curves.push(id.clone());
        }
        Ok(MarketDataRequirements::builder()
            .add_required(curves)
            .add_required(currency_pairs(currencies))
            .add_currencies(currencies.iter().copied())
            .build())
    }

    /// Narrows scenario market data to one [`RatesProvider`] per scenario.
    ///
    /// Configured data missing from the market data is left out of the
    /// providers; a calculator that needs it fails on access.
    ///
    /// # Errors
    ///
    /// Fails if a scenario valuation date cannot be read, or if configured
    /// market data is present but unusable. Absent curves and rates are left
    /// out and reported when accessed.
    fn market_data_view(
        &self,
        market_data: &dyn ScenarioMarketData,
    ) -> CalcResult<RatesScenarioMarketData> {
        let currencies = self.discount_currencies();
        let pairs = currency_pairs(&currencies);
        let mut discount_ids = BTreeMap::new();
        for currency in &currencies {
            if let Some(id) = self.discount_curve_id(*currency) {
                discount_ids.insert(*currency, id.clone());
            }
        }
        let mut forward_ids = BTreeMap::new();
        for index in self.forward_indices() {
            if let Some(id) = self.forward_curve_id(index) {
                forward_ids.insert(index, id.clone());
            }
        }
        let discount_ids = Arc::new(discount_ids);
        let forward_ids = Arc::new(forward_ids);

        let providers = (0..market_data.scenario_count())
            .map(|scenario| {
                let valuation_date = market_data.valuation_date(scenario)?;
                let mut discount_curves = BTreeMap::new();
                for (ccy, id) in discount_ids.iter() {
                    if let Some(curve) = optional(market_data.curve(id, scenario))? {
                        discount_curves.insert(*ccy, curve);
                    }
                }
                let mut forward_curves = BTreeMap::new();
                for (index, id) in forward_ids.iter() {
                    if let Some(curve) = optional(market_data.curve(id, scenario))? {
                        forward_curves.insert(*index, curve);
                    }
                }
                let mut fx_rates = BTreeMap::new();
                for pair in &pairs {
                    if let Some(rate) = optional(market_data.fx_rate(*pair, scenario))? {
                        fx_rates.insert(rate.pair(), rate);
                    }
                }
                Ok(RatesProvider {
                    valuation_date,
                    discount_ids: Arc::clone(&discount_ids),
                    forward_ids: Arc::clone(&forward_ids),
                    discount_curves,
                    forward_curves,
                    fx_rates,
                })
            })
            .collect::<CalcResult<Vec<_>>>()?;

        trace!(scenarios = providers.len(), "built rates market data view");
        Ok(RatesScenarioMarketData { providers })
    }
}

/// Rates lookup held in [`CalculationParameters`](crate::parameters::CalculationParameters).
pub type RatesLookup = Arc<dyn RatesMarketDataLookup>;

impl CalculationParameter for RatesLookup {
    const NAME: &'static str = "RatesMarketDataLookup";
}

/// Pairs of distinct currencies, each once, base before counter in
/// currency order.
fn currency_pairs(currencies: &BTreeSet<Currency>) -> Vec<CurrencyPair> {
    let ordered: Vec<_> = currencies.iter().copied().collect();
    let mut pairs = Vec::new();
    for (i, base) in ordered.iter().enumerate() {
        for counter in &ordered[i + 1..] {
            if let Ok(pair) = CurrencyPair::of(*base, *counter) {
                pairs.push(pair);
            }
        }
    }
    pairs
}

/// A rates lookup with fixed curve names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRatesMarketDataLookup {
    /// Discount curve per currency.
    #[serde(default)]
    pub discount_curves: BTreeMap<Currency, CurveId>,
    /// Forward curve per index.
    #[serde(default)]
    pub forward_curves: BTreeMap<IborIndex, CurveId>,
}

impl DefaultRatesMarketDataLookup {
    /// Creates a lookup from curve names.
    pub fn of(
        discount_curves: impl IntoIterator<Item = (Currency, CurveId)>,
        forward_curves: impl IntoIterator<Item = (IborIndex, CurveId)>,
    ) -> Self {
        Self {
            discount_curves: discount_curves.into_iter().collect(),
            forward_curves: forward_curves.into_iter().collect(),
        }
    }

    /// Wraps the lookup for use as a calculation parameter.
    #[must_use]
    pub fn into_parameter(self) -> RatesLookup {
        Arc::new(self)
    }
}

impl RatesMarketDataLookup for DefaultRatesMarketDataLookup {
    fn discount_curve_id(&self, currency: Currency) -> Option<&CurveId> {
        self.discount_curves.get(&currency)
    }

    fn forward_curve_id(&self, index: IborIndex) -> Option<&CurveId> {
        self.forward_curves.get(&index)
    }

    fn discount_currencies(&self) -> BTreeSet<Currency> {
        self.discount_curves.keys().copied().collect()
    }

    fn forward_indices(&self) -> BTreeSet<IborIndex> {
        self.forward_curves.keys().copied().collect()
    }
}

/// Rates market data for every scenario.
#[derive(Debug, Clone)]
pub struct RatesScenarioMarketData {
    providers: Vec<RatesProvider>,
}

impl RatesScenarioMarketData {
    /// Number of scenarios.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.providers.len()
    }

    /// The provider for one scenario.
    #[must_use]
    pub fn scenario(&self, scenario: usize) -> Option<&RatesProvider> {
        self.providers.get(scenario)
    }

    /// Iterates the providers in scenario order.
    pub fn providers(&self) -> std::slice::Iter<'_, RatesProvider> {
        self.providers.iter()
    }
}

/// Rates market data for a single scenario.
#[derive(Debug, Clone)]
pub struct RatesProvider {
    valuation_date: Date,
    discount_ids: Arc<BTreeMap<Currency, CurveId>>,
    forward_ids: Arc<BTreeMap<IborIndex, CurveId>>,
    discount_curves: BTreeMap<Currency, Arc<InterpolatedCurve>>,
    forward_curves: BTreeMap<IborIndex, Arc<InterpolatedCurve>>,
    fx_rates: BTreeMap<CurrencyPair, FxRate>,
}

impl RatesProvider {
    /// Valuation date of the scenario.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Discount curve for a currency.
    ///
    /// # Errors
    ///
    /// Fails if no curve is configured or the configured curve is missing.
    pub fn discount_curve(&self, currency: Currency) -> CalcResult<&Arc<InterpolatedCurve>> {
        if let Some(curve) = self.discount_curves.get(&currency) {
            return Ok(curve);
        }
        match self.discount_ids.get(&currency) {
            Some(id) => Err(CalcError::missing_market_data(id.clone())),
            None => Err(CalcError::invalid_config(format!(
                "Rates lookup has no discount curve for {currency}"
            ))),
        }
    }

    /// Forward curve for an index.
    ///
    /// # Errors
    ///
    /// Fails if no curve is configured or the configured curve is missing.
    pub fn forward_curve(&self, index: IborIndex) -> CalcResult<&Arc<InterpolatedCurve>> {
        if let Some(curve) = self.forward_curves.get(&index) {
            return Ok(curve);
        }
        match self.forward_ids.get(&index) {
            Some(id) => Err(CalcError::missing_market_data(id.clone())),
            None => Err(CalcError::invalid_config(format!(
                "Rates lookup has no forward curve for {index}"
            ))),
        }
    }

    /// Discount factor for a currency at a date.
    ///
    /// # Errors
    ///
    /// Fails if the discount curve is unavailable.
    pub fn discount_factor(&self, currency: Currency, date: Date) -> CalcResult<f64> {
        Ok(self.discount_curve(currency)?.discount_factor_at(date))
    }

    /// Spot FX rate: units of `counter` for one unit of `base`.
    ///
    /// # Errors
    ///
    /// Fails if neither the pair nor its inverse is available.
    pub fn fx_rate(&self, base: Currency, counter: Currency) -> CalcResult<f64> {
        if base == counter {
            return Ok(1.0);
        }
        let pair = CurrencyPair::of(base, counter)?;
        if let Some(rate) = self.fx_rates.get(&pair) {
            return Ok(rate.rate());
        }
        if let Some(rate) = self.fx_rates.get(&pair.inverse()) {
            return Ok(1.0 / rate.rate());
        }
        Err(CalcError::missing_market_data(pair))
    }

    /// Names of every curve held, without duplicates.
    #[must_use]
    pub fn curve_ids(&self) -> BTreeSet<CurveId> {
        self.discount_curves
            .values()
            .chain(self.forward_curves.values())
            .map(|curve| curve.name().clone())
            .collect()
    }

    /// Returns a copy with one node of a curve shifted.
    ///
    /// The curve is replaced wherever it is used, as discount or forward
    /// curve.
    ///
    /// # Errors
    ///
    /// Fails if the node is out of range.
    pub fn with_curve_node_shifted(&self, curve_id: &CurveId, node: usize, shift: f64) -> CalcResult<Self> {
        let mut bumped = self.clone();
        let mut replacement: Option<Arc<InterpolatedCurve>> = None;
        for curve in bumped
            .discount_curves
            .values_mut()
            .chain(bumped.forward_curves.values_mut())
        {
            if curve.name() == curve_id {
                if replacement.is_none() {
                    replacement = Some(Arc::new(curve.with_node_shifted(node, shift)?));
                }
                if let Some(shifted) = &replacement {
                    *curve = Arc::clone(shifted);
                }
            }
        }
        Ok(bumped)
    }

    /// Number of parameters of a curve held by the provider.
    #[must_use]
    pub fn parameter_count(&self, curve_id: &CurveId) -> Option<usize> {
        self.discount_curves
            .values()
            .chain(self.forward_curves.values())
            .find(|curve| curve.name() == curve_id)
            .map(|curve| curve.parameter_count())
    }
}
