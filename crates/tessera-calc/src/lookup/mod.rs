//! Market data lookups.
//!
//! A lookup names the market data used for a currency or index and builds a
//! typed per-scenario view of it. Lookups are supplied as calculation
//! parameters.

mod ibor_future_option;
mod rates;

use tessera_market::{MarketDataError, MarketDataResult};

use crate::error::CalcResult;

pub use ibor_future_option::{
    DefaultIborFutureOptionMarketDataLookup, IborFutureOptionLookup,
    IborFutureOptionMarketDataLookup, IborFutureOptionScenarioMarketData,
    IborFutureOptionVolatilitiesProvider,
};
pub use rates::{
    DefaultRatesMarketDataLookup, RatesLookup, RatesMarketDataLookup, RatesProvider,
    RatesScenarioMarketData,
};

/// Market data that may legitimately be absent.
///
/// `NotFound` becomes `None`; any other error, such as a value of the wrong
/// kind, is kept.
fn optional<T>(result: MarketDataResult<T>) -> CalcResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(MarketDataError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
