//! Domain value types.
//!
//! - [`Date`]: Calendar date for financial calculations
//! - [`Currency`]: ISO currency codes
//! - [`CurrencyPair`]: Ordered pair of currencies
//! - [`CurrencyAmount`] / [`MultiCurrencyAmount`]: Monetary amounts
//! - [`FxRate`]: Rate on a currency pair

mod amount;
mod currency;
mod currency_pair;
mod date;
mod fx_rate;

pub use amount::{CurrencyAmount, MultiCurrencyAmount};
pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use date::Date;
pub use fx_rate::FxRate;
