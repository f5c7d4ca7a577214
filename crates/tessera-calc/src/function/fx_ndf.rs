//! Calculation function for FX NDF trades.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use tracing::debug;

use tessera_core::{Currency, ReferenceData};
use tessera_market::requirements::MarketDataRequirements;
use tessera_market::scenario::ScenarioMarketData;
use tessera_market::scenario_array::{CurrencyScenarioArray, MultiCurrencyScenarioArray, ScenarioArray};
use tessera_products::fx::{FxNdfTrade, ResolvedFxNdfTrade};

use crate::error::{CalcError, CalcResult};
use crate::function::{CalculationFunction, TargetType};
use crate::lookup::{RatesLookup, RatesScenarioMarketData};
use crate::measure::Measure;
use crate::parameters::CalculationParameters;
use crate::pricer::sensitivity::total_pv01;
use crate::pricer::DiscountingFxNdfPricer;
use crate::registry::MeasureRegistry;
use crate::result::{MeasureResults, MeasureValue};

type Registry = MeasureRegistry<ResolvedFxNdfTrade, RatesScenarioMarketData>;

static CALCULATORS: Lazy<CalcResult<Registry>> = Lazy::new(|| {
    Registry::builder()
        .register(Measure::PresentValue, present_value)
        .register(Measure::Pv01CalibratedSum, pv01_calibrated_sum)
        .register(Measure::Pv01CalibratedBucketed, pv01_calibrated_bucketed)
        .register(Measure::CurrencyExposure, currency_exposure)
        .register(Measure::CurrentCash, current_cash)
        .register(Measure::ForwardFxRate, forward_fx_rate)
        .with_resolved_target()
        .build()
});

const PRICER: DiscountingFxNdfPricer = DiscountingFxNdfPricer::new();

fn calculators() -> CalcResult<&'static Registry> {
    CALCULATORS.as_ref().map_err(Clone::clone)
}

/// Calculates measures on [`FxNdfTrade`].
///
/// Market data is read through the [`RatesLookup`] parameter: a discount
/// curve for each of the two currencies and the spot rate between them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FxNdfTradeCalculationFunction;

impl FxNdfTradeCalculationFunction {
    /// Creates the function.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CalculationFunction for FxNdfTradeCalculationFunction {
    type Target = FxNdfTrade;

    fn target_type(&self) -> TargetType {
        TargetType::FxNdfTrade
    }

    fn supported_measures(&self) -> BTreeSet<Measure> {
        calculators()
            .map(MeasureRegistry::supported_measures)
            .unwrap_or_default()
    }

    fn identifier(&self, target: &FxNdfTrade) -> Option<String> {
        target.info.id.as_ref().map(ToString::to_string)
    }

    fn natural_currency(&self, target: &FxNdfTrade, _ref_data: &ReferenceData) -> CalcResult<Currency> {
        Ok(target.product.settlement_currency)
    }

    fn requirements(
        &self,
        target: &FxNdfTrade,
        _measures: &BTreeSet<Measure>,
        parameters: &CalculationParameters,
        _ref_data: &ReferenceData,
    ) -> CalcResult<MarketDataRequirements> {
        let product = &target.product;
        let other = product
            .non_deliverable_currency()
            .map_err(|e| CalcError::resolution(self.target_type().name(), e))?;
        let currencies = BTreeSet::from([product.settlement_currency, other]);
        let lookup = parameters.parameter::<RatesLookup>()?;
        lookup.requirements(&currencies, &BTreeSet::new())
    }

    fn calculate(
        &self,
        target: &FxNdfTrade,
        measures: &BTreeSet<Measure>,
        parameters: &CalculationParameters,
        market_data: &dyn ScenarioMarketData,
        ref_data: &ReferenceData,
    ) -> CalcResult<MeasureResults> {
        let kind = self.target_type().name();
        debug!(
            target_type = kind,
            id = ?self.identifier(target),
            measures = measures.len(),
            scenarios = market_data.scenario_count(),
            "calculating"
        );
        calculators()?.resolve_and_calculate(kind, target, ref_data, measures, || {
            parameters.parameter::<RatesLookup>()?.market_data_view(market_data)
        })
    }
}

fn present_value(trade: &ResolvedFxNdfTrade, md: &RatesScenarioMarketData) -> CalcResult<MeasureValue> {
    let values = md
        .providers()
        .map(|provider| Ok(PRICER.present_value(&trade.product, provider)?.amount))
        .collect::<CalcResult<Vec<_>>>()?;
    Ok(MeasureValue::Amounts(CurrencyScenarioArray::of(
        trade.product.settlement_currency,
        values,
    )))
}

fn pv01_calibrated_sum(trade: &ResolvedFxNdfTrade, md: &RatesScenarioMarketData) -> CalcResult<MeasureValue> {
    let totals = md
        .providers()
        .map(|provider| Ok(total_pv01(&PRICER.pv01_bucketed(&trade.product, provider)?)))
        .collect::<CalcResult<Vec<_>>>()?;
    Ok(MeasureValue::MultiCurrencyAmounts(MultiCurrencyScenarioArray::of(totals)))
}

fn pv01_calibrated_bucketed(
    trade: &ResolvedFxNdfTrade,
    md: &RatesScenarioMarketData,
) -> CalcResult<MeasureValue> {
    let sensitivities = md
        .providers()
        .map(|provider| PRICER.pv01_bucketed(&trade.product, provider))
        .collect::<CalcResult<ScenarioArray<_>>>()?;
    Ok(MeasureValue::Sensitivities(sensitivities))
}

fn currency_exposure(trade: &ResolvedFxNdfTrade, md: &RatesScenarioMarketData) -> CalcResult<MeasureValue> {
    let exposures = md
        .providers()
        .map(|provider| PRICER.currency_exposure(&trade.product, provider))
        .collect::<CalcResult<Vec<_>>>()?;
    Ok(MeasureValue::MultiCurrencyAmounts(MultiCurrencyScenarioArray::of(exposures)))
}

fn current_cash(trade: &ResolvedFxNdfTrade, md: &RatesScenarioMarketData) -> CalcResult<MeasureValue> {
    let values = md
        .providers()
        .map(|provider| Ok(PRICER.current_cash(&trade.product, provider)?.amount))
        .collect::<CalcResult<Vec<_>>>()?;
    Ok(MeasureValue::Amounts(CurrencyScenarioArray::of(
        trade.product.settlement_currency,
        values,
    )))
}

fn forward_fx_rate(trade: &ResolvedFxNdfTrade, md: &RatesScenarioMarketData) -> CalcResult<MeasureValue> {
    let rates = md
        .providers()
        .map(|provider| PRICER.forward_fx_rate(&trade.product, provider))
        .collect::<CalcResult<ScenarioArray<_>>>()?;
    Ok(MeasureValue::FxRates(rates))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_measures() {
        let measures = FxNdfTradeCalculationFunction::new().supported_measures();
        assert_eq!(
            measures,
            BTreeSet::from([
                Measure::PresentValue,
                Measure::Pv01CalibratedSum,
                Measure::Pv01CalibratedBucketed,
                Measure::CurrencyExposure,
                Measure::CurrentCash,
                Measure::ForwardFxRate,
                Measure::ResolvedTarget,
            ])
        );
        assert!(!measures.contains(&Measure::UnitPrice));
    }
}
