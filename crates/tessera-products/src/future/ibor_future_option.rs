//! Option on an Ibor future.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use tessera_core::error::ensure_in_order_or_equal;
use tessera_core::{CoreResult, Currency, Date, ReferenceData};

use super::ibor_future::{IborFuture, ResolvedIborFuture};
use crate::trade::{decimal_to_f64, Resolvable, TradeInfo};

/// Put or call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PutCall {
    /// Right to buy.
    Call,
    /// Right to sell.
    Put,
}

impl PutCall {
    /// Returns true for a call.
    #[must_use]
    pub fn is_call(self) -> bool {
        self == PutCall::Call
    }
}

impl fmt::Display for PutCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutCall::Call => write!(f, "Call"),
            PutCall::Put => write!(f, "Put"),
        }
    }
}

/// An option on an Ibor future, with strike quoted as a price.
///
/// The option must expire on or before the last trade date of the
/// underlying future; the check is made when the option is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IborFutureOption {
    /// Put or call.
    pub put_call: PutCall,
    /// Expiration date of the option.
    pub expiration_date: Date,
    /// Strike price, e.g. 0.9850.
    pub strike_price: Decimal,
    /// The underlying future.
    pub underlying_future: IborFuture,
}

impl IborFutureOption {
    /// Currency of the option.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.underlying_future.currency
    }

    /// Checks the structural invariants.
    ///
    /// # Errors
    ///
    /// Fails if the expiration date is after the last trade date of the future.
    pub fn validate(&self) -> CoreResult<()> {
        ensure_in_order_or_equal(
            self.expiration_date,
            self.underlying_future.last_trade_date,
            "expirationDate",
            "lastTradeDate",
        )
    }
}

impl Resolvable for IborFutureOption {
    type Resolved = ResolvedIborFutureOption;

    fn resolve(&self, ref_data: &ReferenceData) -> CoreResult<ResolvedIborFutureOption> {
        self.validate()?;
        Ok(ResolvedIborFutureOption {
            put_call: self.put_call,
            expiration_date: self.expiration_date,
            strike_price: decimal_to_f64(self.strike_price, "strikePrice")?,
            underlying_future: self.underlying_future.resolve(ref_data)?,
        })
    }
}

/// An Ibor future option resolved for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIborFutureOption {
    /// Put or call.
    pub put_call: PutCall,
    /// Expiration date.
    pub expiration_date: Date,
    /// Strike price.
    pub strike_price: f64,
    /// The resolved underlying future.
    pub underlying_future: ResolvedIborFuture,
}

impl ResolvedIborFutureOption {
    /// Currency of the option.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.underlying_future.currency
    }
}

/// A trade in an Ibor future option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IborFutureOptionTrade {
    /// Trade information.
    #[serde(default)]
    pub info: TradeInfo,
    /// The product traded.
    pub product: IborFutureOption,
    /// Number of contracts, negative when sold.
    pub quantity: Decimal,
}

impl Resolvable for IborFutureOptionTrade {
    type Resolved = ResolvedIborFutureOptionTrade;

    fn resolve(&self, ref_data: &ReferenceData) -> CoreResult<ResolvedIborFutureOptionTrade> {
        Ok(ResolvedIborFutureOptionTrade {
            info: self.info.clone(),
            product: self.product.resolve(ref_data)?,
            quantity: decimal_to_f64(self.quantity, "quantity")?,
        })
    }
}

/// An Ibor future option trade resolved for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIborFutureOptionTrade {
    /// Trade information.
    pub info: TradeInfo,
    /// The resolved product.
    pub product: ResolvedIborFutureOption,
    /// Number of contracts.
    pub quantity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tessera_core::index::IborIndex;
    use tessera_core::CoreError;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn option(expiration_date: Date) -> IborFutureOption {
        IborFutureOption {
            put_call: PutCall::Call,
            expiration_date,
            strike_price: dec!(0.985),
            underlying_future: IborFuture {
                currency: Currency::USD,
                notional: dec!(1000000),
                accrual_factor: dec!(0.25),
                last_trade_date: date(2025, 3, 13),
                index: IborIndex::UsdLibor3M,
            },
        }
    }

    #[test]
    fn test_expiry_on_last_trade_date_is_valid() {
        let resolved = option(date(2025, 3, 13))
            .resolve(&ReferenceData::standard())
            .unwrap();
        assert_eq!(resolved.expiration_date, date(2025, 3, 13));
        assert_eq!(resolved.currency(), Currency::USD);
    }

    #[test]
    fn test_expiry_after_last_trade_date_fails() {
        let err = option(date(2025, 3, 14))
            .resolve(&ReferenceData::standard())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(err.to_string().contains("'expirationDate' <= 'lastTradeDate'"));
    }

    #[test]
    fn test_trade_quantity() {
        let trade = IborFutureOptionTrade {
            info: TradeInfo::with_id("OPT-1"),
            product: option(date(2025, 3, 10)),
            quantity: dec!(-15),
        };
        let resolved = trade.resolve(&ReferenceData::standard()).unwrap();
        assert!((resolved.quantity + 15.0).abs() < 1e-15);
    }
}
