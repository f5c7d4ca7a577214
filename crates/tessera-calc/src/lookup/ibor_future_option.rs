//! Volatility lookup for Ibor future options.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use tessera_core::index::IborIndex;
use tessera_market::ids::VolatilitiesId;
use tessera_market::requirements::MarketDataRequirements;
use tessera_market::scenario::ScenarioMarketData;
use tessera_market::volatility::NormalIborFutureOptionVolatilities;

use super::optional;
use crate::error::{CalcError, CalcResult};
use crate::parameters::CalculationParameter;

/// Translates Ibor indices into option volatilities.
pub trait IborFutureOptionMarketDataLookup: Send + Sync + fmt::Debug {
    /// Name of the volatilities for an index.
    fn volatility_id(&self, index: IborIndex) -> Option<&VolatilitiesId>;

    /// Indices with volatilities configured.
    fn volatility_indices(&self) -> BTreeSet<IborIndex>;

    /// Market data needed to price options on the given indices.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if an index has no volatilities
    /// configured.
    fn requirements(&self, indices: &BTreeSet<IborIndex>) -> CalcResult<MarketDataRequirements> {
        let ids = indices
            .iter()
            .map(|index| {
                self.volatility_id(*index).cloned().ok_or_else(|| {
                    CalcError::invalid_config(format!(
                        "Ibor future option lookup has no volatilities for {index}"
                    ))
                })
            })
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(MarketDataRequirements::builder().add_required(ids).build())
    }

    /// Narrows scenario market data to the volatilities of each scenario.
    ///
    /// # Errors
    ///
    /// Fails if configured volatilities are present but unusable. Absent
    /// volatilities are left out and reported when accessed.
    fn market_data_view(
        &self,
        market_data: &dyn ScenarioMarketData,
    ) -> CalcResult<IborFutureOptionScenarioMarketData> {
        let ids: Arc<BTreeMap<IborIndex, VolatilitiesId>> = Arc::new(
            self.volatility_indices()
                .into_iter()
                .filter_map(|index| self.volatility_id(index).map(|id| (index, id.clone())))
                .collect(),
        );
        let scenarios = (0..market_data.scenario_count())
            .map(|scenario| {
                let mut volatilities = BTreeMap::new();
                for (index, id) in ids.iter() {
                    if let Some(vols) = optional(market_data.normal_volatilities(id, scenario))? {
                        volatilities.insert(*index, vols);
                    }
                }
                Ok(IborFutureOptionVolatilitiesProvider { ids: Arc::clone(&ids), volatilities })
            })
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(IborFutureOptionScenarioMarketData { scenarios })
    }
}

/// Volatility lookup held in [`CalculationParameters`](crate::parameters::CalculationParameters).
pub type IborFutureOptionLookup = Arc<dyn IborFutureOptionMarketDataLookup>;

impl CalculationParameter for IborFutureOptionLookup {
    const NAME: &'static str = "IborFutureOptionMarketDataLookup";
}

/// A volatility lookup with fixed names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultIborFutureOptionMarketDataLookup {
    /// Volatilities per index.
    #[serde(default)]
    pub volatilities: BTreeMap<IborIndex, VolatilitiesId>,
}

impl DefaultIborFutureOptionMarketDataLookup {
    /// Creates a lookup from volatility names.
    pub fn of(volatilities: impl IntoIterator<Item = (IborIndex, VolatilitiesId)>) -> Self {
        Self {
            volatilities: volatilities.into_iter().collect(),
        }
    }

    /// Wraps the lookup for use as a calculation parameter.
    #[must_use]
    pub fn into_parameter(self) -> IborFutureOptionLookup {
        Arc::new(self)
    }
}

impl IborFutureOptionMarketDataLookup for DefaultIborFutureOptionMarketDataLookup {
    fn volatility_id(&self, index: IborIndex) -> Option<&VolatilitiesId> {
        self.volatilities.get(&index)
    }

    fn volatility_indices(&self) -> BTreeSet<IborIndex> {
        self.volatilities.keys().copied().collect()
    }
}

/// Option volatilities for every scenario.
#[derive(Debug, Clone)]
pub struct IborFutureOptionScenarioMarketData {
    scenarios: Vec<IborFutureOptionVolatilitiesProvider>,
}

impl IborFutureOptionScenarioMarketData {
    /// Number of scenarios.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// The volatilities for one scenario.
    #[must_use]
    pub fn scenario(&self, scenario: usize) -> Option<&IborFutureOptionVolatilitiesProvider> {
        self.scenarios.get(scenario)
    }
}

/// Option volatilities for a single scenario.
#[derive(Debug, Clone)]
pub struct IborFutureOptionVolatilitiesProvider {
    ids: Arc<BTreeMap<IborIndex, VolatilitiesId>>,
    volatilities: BTreeMap<IborIndex, Arc<NormalIborFutureOptionVolatilities>>,
}

impl IborFutureOptionVolatilitiesProvider {
    /// Volatilities for an index.
    ///
    /// # Errors
    ///
    /// Fails if no volatilities are configured for the index or the
    /// configured volatilities are missing.
    pub fn volatilities(&self, index: IborIndex) -> CalcResult<&NormalIborFutureOptionVolatilities> {
        if let Some(vols) = self.volatilities.get(&index) {
            return Ok(vols);
        }
        match self.ids.get(&index) {
            Some(id) => Err(CalcError::missing_market_data(id.clone())),
            None => Err(CalcError::invalid_config(format!(
                "Ibor future option lookup has no volatilities for {index}"
            ))),
        }
    }
}
