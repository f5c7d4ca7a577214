//! # Tessera Market
//!
//! Market data for scenario calculations.
//!
//! - **Identifiers**: [`CurveId`](ids::CurveId), [`VolatilitiesId`](ids::VolatilitiesId)
//!   and the [`MarketDataId`](ids::MarketDataId) key
//! - **Curves and volatilities**: interpolated zero curves with node bumping,
//!   normal volatilities for Ibor future options
//! - **Scenarios**: the [`ScenarioMarketData`](scenario::ScenarioMarketData) trait
//!   and an immutable implementation
//! - **Requirements**: what a calculation needs before it runs
//! - **Scenario arrays**: per-scenario results

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod curve;
pub mod error;
pub mod ids;
mod interpolation;
pub mod requirements;
pub mod scenario;
pub mod scenario_array;
pub mod sensitivity;
pub mod value;
pub mod volatility;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curve::{InterpolatedCurve, ONE_BASIS_POINT};
    pub use crate::error::{MarketDataError, MarketDataResult};
    pub use crate::ids::{CurveId, MarketDataId, VolatilitiesId};
    pub use crate::requirements::{MarketDataRequirements, Presence};
    pub use crate::scenario::{ImmutableScenarioMarketData, ScenarioMarketData};
    pub use crate::scenario_array::{CurrencyScenarioArray, MultiCurrencyScenarioArray, ScenarioArray};
    pub use crate::sensitivity::{CurrencyParameterSensitivities, CurrencyParameterSensitivity};
    pub use crate::value::{MarketDataBox, MarketDataValue};
    pub use crate::volatility::NormalIborFutureOptionVolatilities;
}

pub use error::{MarketDataError, MarketDataResult};
