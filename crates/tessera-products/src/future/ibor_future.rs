//! Ibor future.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tessera_core::index::IborIndex;
use tessera_core::{CoreError, CoreResult, Currency, Date, ReferenceData};

use crate::trade::{decimal_to_f64, Resolvable};

/// A futures contract on an Ibor index, priced as `1 - rate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IborFuture {
    /// Currency of the future, equal to the index currency.
    pub currency: Currency,
    /// Notional of one contract.
    pub notional: Decimal,
    /// Accrual factor of the contract, e.g. 0.25 for a 3 month future.
    pub accrual_factor: Decimal,
    /// Last date the future trades, which is also the index fixing date.
    pub last_trade_date: Date,
    /// Underlying index.
    pub index: IborIndex,
}

impl Resolvable for IborFuture {
    type Resolved = ResolvedIborFuture;

    fn resolve(&self, ref_data: &ReferenceData) -> CoreResult<ResolvedIborFuture> {
        if self.currency != self.index.currency() {
            return Err(CoreError::validation(format!(
                "Future currency {} must match index currency {} of {}",
                self.currency,
                self.index.currency(),
                self.index
            )));
        }
        let notional = decimal_to_f64(self.notional, "notional")?;
        if notional <= 0.0 {
            return Err(CoreError::validation(format!(
                "'notional' must be positive, found {notional}"
            )));
        }
        let accrual_factor = decimal_to_f64(self.accrual_factor, "accrualFactor")?;
        if accrual_factor <= 0.0 {
            return Err(CoreError::validation(format!(
                "'accrualFactor' must be positive, found {accrual_factor}"
            )));
        }

        let fixing_date = self.last_trade_date;
        let accrual_start = self.index.effective_date(fixing_date, ref_data)?;
        let accrual_end = self.index.maturity_date(accrual_start, ref_data)?;
        let index_accrual = self
            .index
            .day_count()
            .year_fraction(accrual_start, accrual_end);

        Ok(ResolvedIborFuture {
            currency: self.currency,
            notional,
            accrual_factor,
            last_trade_date: self.last_trade_date,
            index: self.index,
            fixing_date,
            accrual_start,
            accrual_end,
            index_accrual,
        })
    }
}

/// An Ibor future resolved for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIborFuture {
    /// Currency.
    pub currency: Currency,
    /// Notional of one contract.
    pub notional: f64,
    /// Contract accrual factor.
    pub accrual_factor: f64,
    /// Last trade date.
    pub last_trade_date: Date,
    /// Underlying index.
    pub index: IborIndex,
    /// Index fixing date.
    pub fixing_date: Date,
    /// Start of the index deposit period.
    pub accrual_start: Date,
    /// End of the index deposit period.
    pub accrual_end: Date,
    /// Year fraction of the deposit period in the index day count.
    pub index_accrual: f64,
}
