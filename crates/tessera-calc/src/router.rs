//! Routes targets to their calculation function.

use std::collections::BTreeSet;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tessera_core::{Currency, ReferenceData};
use tessera_market::requirements::MarketDataRequirements;
use tessera_market::scenario::ScenarioMarketData;
use tessera_products::fx::FxNdfTrade;
use tessera_products::future::IborFutureOptionTrade;

use crate::error::{CalcError, CalcResult};
use crate::function::{
    CalculationFunction, FxNdfTradeCalculationFunction, IborFutureOptionTradeCalculationFunction,
    TargetType,
};
use crate::measure::Measure;
use crate::parameters::CalculationParameters;
use crate::result::MeasureResults;

/// A target that can be calculated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculationTarget {
    /// FX NDF trade.
    FxNdf(FxNdfTrade),
    /// Ibor future option trade.
    IborFutureOption(IborFutureOptionTrade),
}

impl From<FxNdfTrade> for CalculationTarget {
    fn from(trade: FxNdfTrade) -> Self {
        CalculationTarget::FxNdf(trade)
    }
}

impl From<IborFutureOptionTrade> for CalculationTarget {
    fn from(trade: IborFutureOptionTrade) -> Self {
        CalculationTarget::IborFutureOption(trade)
    }
}

/// The calculation functions for every target type.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculationFunctions {
    fx_ndf: FxNdfTradeCalculationFunction,
    ibor_future_option: IborFutureOptionTradeCalculationFunction,
}

impl CalculationFunctions {
    /// The standard functions.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            fx_ndf: FxNdfTradeCalculationFunction::new(),
            ibor_future_option: IborFutureOptionTradeCalculationFunction::new(),
        }
    }

    /// Type of a target.
    #[must_use]
    pub fn target_type(&self, target: &CalculationTarget) -> TargetType {
        match target {
            CalculationTarget::FxNdf(_) => self.fx_ndf.target_type(),
            CalculationTarget::IborFutureOption(_) => self.ibor_future_option.target_type(),
        }
    }

    /// Measures supported for a target.
    #[must_use]
    pub fn supported_measures(&self, target: &CalculationTarget) -> BTreeSet<Measure> {
        match target {
            CalculationTarget::FxNdf(_) => self.fx_ndf.supported_measures(),
            CalculationTarget::IborFutureOption(_) => self.ibor_future_option.supported_measures(),
        }
    }

    /// Identifier of a target, if it has one.
    #[must_use]
    pub fn identifier(&self, target: &CalculationTarget) -> Option<String> {
        match target {
            CalculationTarget::FxNdf(t) => self.fx_ndf.identifier(t),
            CalculationTarget::IborFutureOption(t) => self.ibor_future_option.identifier(t),
        }
    }

    /// Natural currency of a target.
    ///
    /// # Errors
    ///
    /// Fails if the target is structurally inconsistent.
    pub fn natural_currency(&self, target: &CalculationTarget, ref_data: &ReferenceData) -> CalcResult<Currency> {
        match target {
            CalculationTarget::FxNdf(t) => self.fx_ndf.natural_currency(t, ref_data),
            CalculationTarget::IborFutureOption(t) => self.ibor_future_option.natural_currency(t, ref_data),
        }
    }

    /// Market data needed by a target.
    ///
    /// # Errors
    ///
    /// See [`CalculationFunction::requirements`].
    pub fn requirements(
        &self,
        target: &CalculationTarget,
        measures: &BTreeSet<Measure>,
        parameters: &CalculationParameters,
        ref_data: &ReferenceData,
    ) -> CalcResult<MarketDataRequirements> {
        match target {
            CalculationTarget::FxNdf(t) => self.fx_ndf.requirements(t, measures, parameters, ref_data),
            CalculationTarget::IborFutureOption(t) => {
                self.ibor_future_option.requirements(t, measures, parameters, ref_data)
            }
        }
    }

    /// Market data needed by all targets together.
    ///
    /// # Errors
    ///
    /// Fails on the first target whose requirements cannot be derived.
    pub fn requirements_all(
        &self,
        targets: &[CalculationTarget],
        measures: &BTreeSet<Measure>,
        parameters: &CalculationParameters,
        ref_data: &ReferenceData,
    ) -> CalcResult<MarketDataRequirements> {
        let all = targets
            .iter()
            .map(|target| self.requirements(target, measures, parameters, ref_data))
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(MarketDataRequirements::combine(&all))
    }

    /// Calculates measures for a target.
    ///
    /// # Errors
    ///
    /// See [`CalculationFunction::calculate`].
    pub fn calculate(
        &self,
        target: &CalculationTarget,
        measures: &BTreeSet<Measure>,
        parameters: &CalculationParameters,
        market_data: &dyn ScenarioMarketData,
        ref_data: &ReferenceData,
    ) -> CalcResult<MeasureResults> {
        match target {
            CalculationTarget::FxNdf(t) => {
                self.fx_ndf.calculate(t, measures, parameters, market_data, ref_data)
            }
            CalculationTarget::IborFutureOption(t) => {
                self.ibor_future_option
                    .calculate(t, measures, parameters, market_data, ref_data)
            }
        }
    }

    /// Calculates measures for many targets in parallel.
    ///
    /// Targets are independent: a target that fails to resolve is reported
    /// in its own output and does not stop the others.
    pub fn calculate_all(
        &self,
        targets: &[CalculationTarget],
        measures: &BTreeSet<Measure>,
        parameters: &CalculationParameters,
        market_data: &dyn ScenarioMarketData,
        ref_data: &ReferenceData,
    ) -> BatchCalculationResult {
        let start = Instant::now();
        let outputs: Vec<_> = targets
            .par_iter()
            .map(|target| self.calculate(target, measures, parameters, market_data, ref_data))
            .collect();
        let elapsed = start.elapsed();

        let mut succeeded = 0;
        let mut failed = 0;
        let mut measure_failures = 0;
        for (target, output) in targets.iter().zip(&outputs) {
            match output {
                Ok(results) => {
                    succeeded += 1;
                    measure_failures += results.values().filter(|r| r.is_err()).count();
                }
                Err(e) => {
                    failed += 1;
                    warn!(
                        target_type = %self.target_type(target),
                        id = ?self.identifier(target),
                        error = %e,
                        "target failed"
                    );
                }
            }
        }

        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        info!(
            targets = targets.len(),
            succeeded,
            failed,
            measure_failures,
            elapsed_ms,
            "batch calculation complete"
        );

        BatchCalculationResult {
            outputs,
            succeeded,
            failed,
            measure_failures,
            elapsed_ms,
        }
    }
}

/// Outcome of [`CalculationFunctions::calculate_all`].
#[derive(Debug)]
pub struct BatchCalculationResult {
    /// Results per target, in input order.
    pub outputs: Vec<Result<MeasureResults, CalcError>>,
    /// Targets calculated, possibly with failed measures.
    pub succeeded: usize,
    /// Targets that failed as a whole.
    pub failed: usize,
    /// Failed measures across the succeeded targets.
    pub measure_failures: usize,
    /// Total elapsed time in milliseconds.
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tessera_core::calendars::BusinessDayAdjustment;
    use tessera_core::index::FxIndex;
    use tessera_core::{CurrencyPair, Date};
    use tessera_products::fx::FxNdf;
    use tessera_products::TradeInfo;

    fn ndf_trade() -> CalculationTarget {
        let pair = CurrencyPair::of(Currency::EUR, Currency::USD).unwrap();
        FxNdfTrade::of(
            TradeInfo::with_id("NDF-1"),
            FxNdf {
                settlement_currency: Currency::USD,
                settlement_notional: dec!(1000000),
                agreed_rate: dec!(1.1),
                index: FxIndex::of(pair, "SAT_SUN", 2),
                payment_date: Date::from_ymd(2026, 1, 15).unwrap(),
                payment_date_adjustment: BusinessDayAdjustment::none(),
            },
        )
        .into()
    }

    #[test]
    fn test_routes_by_variant() {
        let functions = CalculationFunctions::standard();
        let target = ndf_trade();
        assert_eq!(functions.target_type(&target), TargetType::FxNdfTrade);
        assert_eq!(functions.identifier(&target).as_deref(), Some("NDF-1"));
        assert_eq!(
            functions.natural_currency(&target, &ReferenceData::standard()).unwrap(),
            Currency::USD
        );
        assert!(functions.supported_measures(&target).contains(&Measure::ForwardFxRate));
    }

    #[test]
    fn test_requirements_need_lookup() {
        let err = CalculationFunctions::standard()
            .requirements(
                &ndf_trade(),
                &BTreeSet::from([Measure::PresentValue]),
                &CalculationParameters::empty(),
                &ReferenceData::standard(),
            )
            .unwrap_err();
        assert_eq!(err, CalcError::NotConfigured { parameter: "RatesMarketDataLookup" });
    }

    #[test]
    fn test_target_serde_is_tagged() {
        let json = serde_json::to_value(ndf_trade()).unwrap();
        assert_eq!(json["type"], "fx_ndf");
        let back: CalculationTarget = serde_json::from_value(json).unwrap();
        match back {
            CalculationTarget::FxNdf(trade) => {
                assert_eq!(trade.info.id.unwrap().as_str(), "NDF-1");
                assert_eq!(trade.product.settlement_currency, Currency::USD);
            }
            CalculationTarget::IborFutureOption(_) => panic!("wrong variant"),
        }
    }
}
