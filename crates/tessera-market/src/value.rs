//! Market data values, single or per scenario.

use std::sync::Arc;

use tessera_core::FxRate;

use crate::curve::InterpolatedCurve;
use crate::error::{MarketDataError, MarketDataResult};
use crate::ids::MarketDataId;
use crate::volatility::NormalIborFutureOptionVolatilities;

/// One item of market data.
///
/// Large values are held behind `Arc` so that views built per scenario share
/// them instead of copying.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketDataValue {
    /// A zero rate curve.
    Curve(Arc<InterpolatedCurve>),
    /// A spot FX rate.
    FxRate(FxRate),
    /// Normal volatilities for Ibor future options.
    NormalVolatilities(Arc<NormalIborFutureOptionVolatilities>),
}

impl MarketDataValue {
    /// Kind name used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MarketDataValue::Curve(_) => "curve",
            MarketDataValue::FxRate(_) => "FX rate",
            MarketDataValue::NormalVolatilities(_) => "normal volatilities",
        }
    }
}

impl From<InterpolatedCurve> for MarketDataValue {
    fn from(curve: InterpolatedCurve) -> Self {
        MarketDataValue::Curve(Arc::new(curve))
    }
}

impl From<FxRate> for MarketDataValue {
    fn from(rate: FxRate) -> Self {
        MarketDataValue::FxRate(rate)
    }
}

impl From<NormalIborFutureOptionVolatilities> for MarketDataValue {
    fn from(vols: NormalIborFutureOptionVolatilities) -> Self {
        MarketDataValue::NormalVolatilities(Arc::new(vols))
    }
}

/// A market data value shared by all scenarios, or one value per scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketDataBox {
    /// The same value in every scenario.
    Single(MarketDataValue),
    /// One value per scenario, indexed by scenario.
    Scenarios(Vec<MarketDataValue>),
}

impl MarketDataBox {
    /// Number of scenario values, `None` for a single value.
    #[must_use]
    pub fn scenario_count(&self) -> Option<usize> {
        match self {
            MarketDataBox::Single(_) => None,
            MarketDataBox::Scenarios(values) => Some(values.len()),
        }
    }

    /// Returns the value for a scenario.
    ///
    /// # Errors
    ///
    /// Fails if the scenario index is beyond the per-scenario values.
    pub fn value(&self, scenario: usize) -> MarketDataResult<&MarketDataValue> {
        match self {
            MarketDataBox::Single(value) => Ok(value),
            MarketDataBox::Scenarios(values) => {
                values
                    .get(scenario)
                    .ok_or(MarketDataError::ScenarioOutOfRange {
                        index: scenario,
                        count: values.len(),
                    })
            }
        }
    }

    /// Returns the curve for a scenario.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a curve or the scenario is out of range.
    pub fn curve(&self, id: &MarketDataId, scenario: usize) -> MarketDataResult<Arc<InterpolatedCurve>> {
        match self.value(scenario)? {
            MarketDataValue::Curve(curve) => Ok(Arc::clone(curve)),
            _ => Err(MarketDataError::WrongType {
                id: id.clone(),
                expected: "curve",
            }),
        }
    }

    /// Returns the FX rate for a scenario.
    ///
    /// # Errors
    ///
    /// Fails if the value is not an FX rate or the scenario is out of range.
    pub fn fx_rate(&self, id: &MarketDataId, scenario: usize) -> MarketDataResult<FxRate> {
        match self.value(scenario)? {
            MarketDataValue::FxRate(rate) => Ok(*rate),
            _ => Err(MarketDataError::WrongType {
                id: id.clone(),
                expected: "FX rate",
            }),
        }
    }

    /// Returns the normal volatilities for a scenario.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a volatility or the scenario is out of range.
    pub fn normal_volatilities(
        &self,
        id: &MarketDataId,
        scenario: usize,
    ) -> MarketDataResult<Arc<NormalIborFutureOptionVolatilities>> {
        match self.value(scenario)? {
            MarketDataValue::NormalVolatilities(vols) => Ok(Arc::clone(vols)),
            _ => Err(MarketDataError::WrongType {
                id: id.clone(),
                expected: "normal volatilities",
            }),
        }
    }
}
