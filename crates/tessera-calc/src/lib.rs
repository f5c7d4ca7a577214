//! # Tessera Calc
//!
//! Scenario calculation dispatch for the Tessera engine.
//!
//! A [`CalculationFunction`](function::CalculationFunction) exists for each
//! kind of target. Given a target, a set of [`Measure`]s, the calculation
//! parameters and scenario market data it:
//!
//! - declares the measures it supports and the market data it needs
//! - resolves the target once against reference data
//! - runs each requested measure through its registry, one scenario array per measure
//! - isolates failures so that one measure failing never affects another
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_calc::prelude::*;
//!
//! let config = CalculationConfig::from_file("calc.toml")?;
//! let parameters = config.to_parameters()?;
//! let functions = CalculationFunctions::standard();
//!
//! let results = functions.calculate(&target, &config.requested_measures()?, &parameters, &market_data, &ref_data)?;
//! match &results[&Measure::PresentValue] {
//!     Ok(value) => println!("{:?}", value.as_amounts()),
//!     Err(failure) => println!("{failure}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod error;
pub mod function;
pub mod lookup;
pub mod measure;
pub mod parameters;
pub mod pricer;
pub mod registry;
pub mod result;
pub mod router;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{CalculationConfig, Validate, ValidationError};
    pub use crate::error::{CalcError, CalcResult};
    pub use crate::function::{
        CalculationFunction, FxNdfTradeCalculationFunction, IborFutureOptionTradeCalculationFunction,
        TargetType,
    };
    pub use crate::lookup::{
        DefaultIborFutureOptionMarketDataLookup, DefaultRatesMarketDataLookup, IborFutureOptionLookup,
        IborFutureOptionMarketDataLookup, RatesLookup, RatesMarketDataLookup,
    };
    pub use crate::measure::Measure;
    pub use crate::parameters::{CalculationParameter, CalculationParameters};
    pub use crate::result::{Failure, FailureReason, MeasureResult, MeasureResults, MeasureValue, ResolvedTarget};
    pub use crate::router::{BatchCalculationResult, CalculationFunctions, CalculationTarget};
}

pub use error::{CalcError, CalcResult};
pub use measure::Measure;
pub use result::{Failure, FailureReason, MeasureResult, MeasureResults, MeasureValue};
