//! Per-measure results.
//!
//! Every requested measure produces a [`MeasureResult`]: either a complete
//! [`MeasureValue`] covering all scenarios or a [`Failure`]. There are no
//! partial results.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use tessera_core::FxRate;
use tessera_market::scenario_array::{CurrencyScenarioArray, MultiCurrencyScenarioArray, ScenarioArray};
use tessera_market::sensitivity::CurrencyParameterSensitivities;
use tessera_products::fx::ResolvedFxNdfTrade;
use tessera_products::future::ResolvedIborFutureOptionTrade;

use crate::error::CalcError;
use crate::measure::Measure;

/// Why a measure failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    /// The measure is not supported for the target.
    Unsupported,
    /// Required market data is missing.
    MissingData,
    /// Input was invalid.
    Invalid,
    /// The calculation itself failed.
    CalculationFailed,
    /// Unexpected error, including a panic inside a calculator.
    Error,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureReason::Unsupported => "UNSUPPORTED",
            FailureReason::MissingData => "MISSING_DATA",
            FailureReason::Invalid => "INVALID",
            FailureReason::CalculationFailed => "CALCULATION_FAILED",
            FailureReason::Error => "ERROR",
        };
        write!(f, "{name}")
    }
}

/// The failure of one measure.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// Classification of the failure.
    pub reason: FailureReason,
    /// Human readable message.
    pub message: String,
    /// The error that caused the failure, if there was one.
    pub cause: Option<CalcError>,
}

impl Failure {
    /// Creates a failure without an underlying error.
    #[must_use]
    pub fn of(reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
            cause: None,
        }
    }

    /// Failure for a measure the target does not support.
    #[must_use]
    pub fn unsupported(target_kind: &str, measure: Measure) -> Self {
        Self::of(
            FailureReason::Unsupported,
            format!("Unsupported measure for {target_kind}: {measure}"),
        )
    }

    /// Failure carrying the error that caused it.
    #[must_use]
    pub fn from_error(error: CalcError) -> Self {
        Self {
            reason: error.failure_reason(),
            message: error.to_string(),
            cause: Some(error),
        }
    }

    /// Failure for a calculator that panicked.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self::of(FailureReason::Error, format!("Calculation panicked: {detail}"))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.message)
    }
}

impl From<CalcError> for Failure {
    fn from(error: CalcError) -> Self {
        Self::from_error(error)
    }
}

/// A resolved target returned by the `ResolvedTarget` measure.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTarget {
    /// A resolved FX NDF trade.
    FxNdfTrade(ResolvedFxNdfTrade),
    /// A resolved Ibor future option trade.
    IborFutureOptionTrade(ResolvedIborFutureOptionTrade),
}

impl From<ResolvedFxNdfTrade> for ResolvedTarget {
    fn from(trade: ResolvedFxNdfTrade) -> Self {
        ResolvedTarget::FxNdfTrade(trade)
    }
}

impl From<ResolvedIborFutureOptionTrade> for ResolvedTarget {
    fn from(trade: ResolvedIborFutureOptionTrade) -> Self {
        ResolvedTarget::IborFutureOptionTrade(trade)
    }
}

/// The value of a successful measure, covering every scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureValue {
    /// Amounts in a single currency.
    Amounts(CurrencyScenarioArray),
    /// Amounts in several currencies.
    MultiCurrencyAmounts(MultiCurrencyScenarioArray),
    /// Curve parameter sensitivities.
    Sensitivities(ScenarioArray<CurrencyParameterSensitivities>),
    /// FX rates.
    FxRates(ScenarioArray<FxRate>),
    /// Plain numbers, such as prices.
    Values(ScenarioArray<f64>),
    /// The resolved target, identical in every scenario.
    ResolvedTarget(Box<ResolvedTarget>),
}

impl MeasureValue {
    /// Returns the single currency amounts, if that is the payload.
    #[must_use]
    pub fn as_amounts(&self) -> Option<&CurrencyScenarioArray> {
        match self {
            MeasureValue::Amounts(amounts) => Some(amounts),
            _ => None,
        }
    }

    /// Returns the multi-currency amounts, if that is the payload.
    #[must_use]
    pub fn as_multi_currency_amounts(&self) -> Option<&MultiCurrencyScenarioArray> {
        match self {
            MeasureValue::MultiCurrencyAmounts(amounts) => Some(amounts),
            _ => None,
        }
    }

    /// Returns the sensitivities, if that is the payload.
    #[must_use]
    pub fn as_sensitivities(&self) -> Option<&ScenarioArray<CurrencyParameterSensitivities>> {
        match self {
            MeasureValue::Sensitivities(sens) => Some(sens),
            _ => None,
        }
    }

    /// Returns the FX rates, if that is the payload.
    #[must_use]
    pub fn as_fx_rates(&self) -> Option<&ScenarioArray<FxRate>> {
        match self {
            MeasureValue::FxRates(rates) => Some(rates),
            _ => None,
        }
    }

    /// Returns the plain values, if that is the payload.
    #[must_use]
    pub fn as_values(&self) -> Option<&ScenarioArray<f64>> {
        match self {
            MeasureValue::Values(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the resolved target, if that is the payload.
    #[must_use]
    pub fn as_resolved_target(&self) -> Option<&ResolvedTarget> {
        match self {
            MeasureValue::ResolvedTarget(target) => Some(target),
            _ => None,
        }
    }
}

/// Outcome of one measure.
pub type MeasureResult = Result<MeasureValue, Failure>;

/// Outcome of every requested measure, keyed by measure.
pub type MeasureResults = HashMap<Measure, MeasureResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_market::ids::CurveId;
    use tessera_market::MarketDataError;

    #[test]
    fn test_unsupported_message() {
        let failure = Failure::unsupported("FxNdfTrade", Measure::UnitPrice);
        assert_eq!(failure.reason, FailureReason::Unsupported);
        assert_eq!(failure.message, "Unsupported measure for FxNdfTrade: UnitPrice");
        assert!(failure.cause.is_none());
    }

    #[test]
    fn test_from_error_keeps_cause() {
        let err = CalcError::from(MarketDataError::not_found(CurveId::new("EUR-Disc")));
        let failure = Failure::from(err.clone());
        assert_eq!(failure.reason, FailureReason::MissingData);
        assert!(failure.message.contains("EUR-Disc"));
        assert_eq!(failure.cause, Some(err));
    }

    #[test]
    fn test_from_panic_payloads() {
        let static_str: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(
            Failure::from_panic(static_str.as_ref()).message,
            "Calculation panicked: boom"
        );
        let owned: Box<dyn Any + Send> = Box::new(String::from("index out of bounds"));
        let failure = Failure::from_panic(owned.as_ref());
        assert_eq!(failure.reason, FailureReason::Error);
        assert!(failure.message.ends_with("index out of bounds"));
    }

    #[test]
    fn test_accessors() {
        let value = MeasureValue::Values(ScenarioArray::of([0.98]));
        assert!(value.as_values().is_some());
        assert!(value.as_amounts().is_none());
        assert!(value.as_resolved_target().is_none());
    }
}
