//! Calculation function for Ibor future option trades.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use tracing::debug;

use tessera_core::{Currency, MultiCurrencyAmount, ReferenceData};
use tessera_market::requirements::MarketDataRequirements;
use tessera_market::scenario::ScenarioMarketData;
use tessera_market::scenario_array::{CurrencyScenarioArray, MultiCurrencyScenarioArray, ScenarioArray};
use tessera_market::volatility::NormalIborFutureOptionVolatilities;
use tessera_market::MarketDataError;
use tessera_products::future::{IborFutureOptionTrade, ResolvedIborFutureOptionTrade};

use crate::error::CalcResult;
use crate::function::{CalculationFunction, TargetType};
use crate::lookup::{
    IborFutureOptionLookup, IborFutureOptionScenarioMarketData, RatesLookup, RatesProvider,
    RatesScenarioMarketData,
};
use crate::measure::Measure;
use crate::parameters::CalculationParameters;
use crate::pricer::sensitivity::total_pv01;
use crate::pricer::NormalIborFutureOptionPricer;
use crate::registry::MeasureRegistry;
use crate::result::{MeasureResults, MeasureValue};

/// Rates and volatilities for every scenario.
struct OptionScenarioMarketData {
    rates: RatesScenarioMarketData,
    volatilities: IborFutureOptionScenarioMarketData,
}

impl OptionScenarioMarketData {
    /// Applies `f` to the market data of each scenario in turn.
    fn map_scenarios<T>(
        &self,
        trade: &ResolvedIborFutureOptionTrade,
        f: impl Fn(&RatesProvider, &NormalIborFutureOptionVolatilities) -> CalcResult<T>,
    ) -> CalcResult<Vec<T>> {
        let index = trade.product.underlying_future.index;
        let count = self.rates.scenario_count();
        (0..count)
            .map(|scenario| {
                let out_of_range = || MarketDataError::ScenarioOutOfRange { index: scenario, count };
                let rates = self.rates.scenario(scenario).ok_or_else(out_of_range)?;
                let vols = self
                    .volatilities
                    .scenario(scenario)
                    .ok_or_else(out_of_range)?
                    .volatilities(index)?;
                f(rates, vols)
            })
            .collect()
    }
}

type Registry = MeasureRegistry<ResolvedIborFutureOptionTrade, OptionScenarioMarketData>;

static CALCULATORS: Lazy<CalcResult<Registry>> = Lazy::new(|| {
    Registry::builder()
        .register(Measure::PresentValue, present_value)
        .register(Measure::UnitPrice, unit_price)
        .register(Measure::Pv01CalibratedSum, pv01_calibrated_sum)
        .register(Measure::Pv01CalibratedBucketed, pv01_calibrated_bucketed)
        .register(Measure::CurrencyExposure, currency_exposure)
        .with_resolved_target()
        .build()
});

const PRICER: NormalIborFutureOptionPricer = NormalIborFutureOptionPricer::new();

fn calculators() -> CalcResult<&'static Registry> {
    CALCULATORS.as_ref().map_err(Clone::clone)
}

/// Calculates measures on [`IborFutureOptionTrade`].
///
/// Needs both the [`RatesLookup`] and the [`IborFutureOptionLookup`]
/// parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct IborFutureOptionTradeCalculationFunction;

impl IborFutureOptionTradeCalculationFunction {
    /// Creates the function.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CalculationFunction for IborFutureOptionTradeCalculationFunction {
    type Target = IborFutureOptionTrade;

    fn target_type(&self) -> TargetType {
        TargetType::IborFutureOptionTrade
    }

    fn supported_measures(&self) -> BTreeSet<Measure> {
        calculators()
            .map(MeasureRegistry::supported_measures)
            .unwrap_or_default()
    }

    fn identifier(&self, target: &IborFutureOptionTrade) -> Option<String> {
        target.info.id.as_ref().map(ToString::to_string)
    }

    fn natural_currency(
        &self,
        target: &IborFutureOptionTrade,
        _ref_data: &ReferenceData,
    ) -> CalcResult<Currency> {
        Ok(target.product.currency())
    }

    fn requirements(
        &self,
        target: &IborFutureOptionTrade,
        _measures: &BTreeSet<Measure>,
        parameters: &CalculationParameters,
        _ref_data: &ReferenceData,
    ) -> CalcResult<MarketDataRequirements> {
        let future = &target.product.underlying_future;
        let currencies = BTreeSet::from([future.currency]);
        let indices = BTreeSet::from([future.index]);
        let rates = parameters.parameter::<RatesLookup>()?;
        let vols = parameters.parameter::<IborFutureOptionLookup>()?;
        Ok(rates
            .requirements(&currencies, &indices)?
            .combined_with(&vols.requirements(&indices)?))
    }

    fn calculate(
        &self,
        target: &IborFutureOptionTrade,
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
            let rates = parameters.parameter::<RatesLookup>()?;
            let vols = parameters.parameter::<IborFutureOptionLookup>()?;
            Ok(OptionScenarioMarketData {
                rates: rates.market_data_view(market_data)?,
                volatilities: vols.market_data_view(market_data)?,
            })
        })
    }
}

fn present_value(
    trade: &ResolvedIborFutureOptionTrade,
    md: &OptionScenarioMarketData,
) -> CalcResult<MeasureValue> {
    let values = md.map_scenarios(trade, |rates, vols| {
        Ok(PRICER.present_value(trade, rates, vols)?.amount)
    })?;
    Ok(MeasureValue::Amounts(CurrencyScenarioArray::of(trade.product.currency(), values)))
}

fn unit_price(trade: &ResolvedIborFutureOptionTrade, md: &OptionScenarioMarketData) -> CalcResult<MeasureValue> {
    let prices = md.map_scenarios(trade, |rates, vols| PRICER.unit_price(&trade.product, rates, vols))?;
    Ok(MeasureValue::Values(ScenarioArray::of(prices)))
}

fn pv01_calibrated_sum(
    trade: &ResolvedIborFutureOptionTrade,
    md: &OptionScenarioMarketData,
) -> CalcResult<MeasureValue> {
    let totals = md.map_scenarios(trade, |rates, vols| {
        Ok(total_pv01(&PRICER.pv01_bucketed(trade, rates, vols)?))
    })?;
    Ok(MeasureValue::MultiCurrencyAmounts(MultiCurrencyScenarioArray::of(totals)))
}

fn pv01_calibrated_bucketed(
    trade: &ResolvedIborFutureOptionTrade,
    md: &OptionScenarioMarketData,
) -> CalcResult<MeasureValue> {
    let sensitivities = md.map_scenarios(trade, |rates, vols| PRICER.pv01_bucketed(trade, rates, vols))?;
    Ok(MeasureValue::Sensitivities(ScenarioArray::of(sensitivities)))
}

fn currency_exposure(
    trade: &ResolvedIborFutureOptionTrade,
    md: &OptionScenarioMarketData,
) -> CalcResult<MeasureValue> {
    let exposures = md.map_scenarios(trade, |rates, vols| {
        Ok(MultiCurrencyAmount::of([PRICER.present_value(trade, rates, vols)?]))
    })?;
    Ok(MeasureValue::MultiCurrencyAmounts(MultiCurrencyScenarioArray::of(exposures)))
}
