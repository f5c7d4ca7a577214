//! Monetary amounts in one or several currencies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Currency, FxRate};
use crate::error::CoreResult;

/// An amount of a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    /// Currency of the amount.
    pub currency: Currency,
    /// The amount.
    pub amount: f64,
}

impl CurrencyAmount {
    /// Creates a currency amount.
    #[must_use]
    pub fn of(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// Creates a zero amount.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::of(currency, 0.0)
    }

    /// Returns the amount multiplied by `factor`.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self::of(self.currency, self.amount * factor)
    }

    /// Converts the amount to another currency.
    ///
    /// # Errors
    ///
    /// Fails if `fx` does not relate the two currencies.
    pub fn convert_to(&self, currency: Currency, fx: &FxRate) -> CoreResult<CurrencyAmount> {
        if currency == self.currency {
            return Ok(*self);
        }
        let rate = fx.fx_rate(self.currency, currency)?;
        Ok(Self::of(currency, self.amount * rate))
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

/// Amounts in several currencies, at most one amount per currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiCurrencyAmount {
    amounts: BTreeMap<Currency, f64>,
}

impl MultiCurrencyAmount {
    /// Creates an empty amount.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an amount from individual currency amounts, summing duplicates.
    pub fn of(amounts: impl IntoIterator<Item = CurrencyAmount>) -> Self {
        amounts
            .into_iter()
            .fold(Self::empty(), |acc, amount| acc.plus(amount))
    }

    /// Returns a copy with `amount` added.
    #[must_use]
    pub fn plus(mut self, amount: CurrencyAmount) -> Self {
        *self.amounts.entry(amount.currency).or_insert(0.0) += amount.amount;
        self
    }

    /// Returns the amount for a currency, zero if absent.
    #[must_use]
    pub fn amount(&self, currency: Currency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Returns the currencies present.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.amounts.keys().copied()
    }

    /// Returns the individual currency amounts.
    pub fn iter(&self) -> impl Iterator<Item = CurrencyAmount> + '_ {
        self.amounts
            .iter()
            .map(|(currency, amount)| CurrencyAmount::of(*currency, *amount))
    }

    /// Returns the number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Returns true if there are no amounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Converts every amount to `currency` and sums.
    ///
    /// # Errors
    ///
    /// Fails if a needed conversion rate is not provided by `fx`.
    pub fn convert_to(&self, currency: Currency, fx: &FxRate) -> CoreResult<CurrencyAmount> {
        self.iter().try_fold(CurrencyAmount::zero(currency), |acc, amount| {
            let converted = amount.convert_to(currency, fx)?;
            Ok(CurrencyAmount::of(currency, acc.amount + converted.amount))
        })
    }
}
