//! Calculation functions, one per target type.
//!
//! A calculation function is the entry point for calculating measures on a
//! target. It declares the measures it supports, derives the market data the
//! target needs and runs the requested measures through its registry.

mod fx_ndf;
mod ibor_future_option;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use tessera_core::{Currency, ReferenceData};
use tessera_market::requirements::MarketDataRequirements;
use tessera_market::scenario::ScenarioMarketData;

use crate::error::CalcResult;
use crate::measure::Measure;
use crate::parameters::CalculationParameters;
use crate::result::MeasureResults;

pub use fx_ndf::FxNdfTradeCalculationFunction;
pub use ibor_future_option::IborFutureOptionTradeCalculationFunction;

/// The kinds of target that can be calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// A trade in an FX non-deliverable forward.
    FxNdfTrade,
    /// A trade in an option on an Ibor future.
    IborFutureOptionTrade,
}

impl TargetType {
    /// Returns the name used in messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TargetType::FxNdfTrade => "FxNdfTrade",
            TargetType::IborFutureOptionTrade => "IborFutureOptionTrade",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Calculates measures for one type of target.
///
/// Implementations are stateless and shared across threads.
pub trait CalculationFunction: Send + Sync {
    /// The target handled.
    type Target;

    /// The type of target handled.
    fn target_type(&self) -> TargetType;

    /// Measures that can be calculated.
    ///
    /// Requesting any other measure produces an unsupported failure for that
    /// measure alone.
    fn supported_measures(&self) -> BTreeSet<Measure>;

    /// Identifier of the target, for diagnostics.
    fn identifier(&self, target: &Self::Target) -> Option<String>;

    /// The currency results are most naturally expressed in.
    ///
    /// # Errors
    ///
    /// Fails only if the target is structurally inconsistent.
    fn natural_currency(&self, target: &Self::Target, ref_data: &ReferenceData) -> CalcResult<Currency>;

    /// Market data needed to calculate the target.
    ///
    /// The full set for the target is returned whichever measures are
    /// requested. No market data is read.
    ///
    /// # Errors
    ///
    /// Fails if the target is structurally inconsistent or the lookups in
    /// `parameters` are absent or incomplete.
    fn requirements(
        &self,
        target: &Self::Target,
        measures: &BTreeSet<Measure>,
        parameters: &CalculationParameters,
        ref_data: &ReferenceData,
    ) -> CalcResult<MarketDataRequirements>;

    /// Calculates the requested measures for every scenario.
    ///
    /// The returned map holds exactly one result per requested measure.
    ///
    /// # Errors
    ///
    /// Fails as a whole if the target cannot be resolved or the market data
    /// lookups are not configured. Any other problem is reported against the
    /// measure it affects.
    fn calculate(
        &self,
        target: &Self::Target,
        measures: &BTreeSet<Measure>,
        parameters: &CalculationParameters,
        market_data: &dyn ScenarioMarketData,
        ref_data: &ReferenceData,
    ) -> CalcResult<MeasureResults>;
}
