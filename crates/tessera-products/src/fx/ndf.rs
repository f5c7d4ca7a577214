//! FX non-deliverable forward.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tessera_core::calendars::BusinessDayAdjustment;
use tessera_core::index::FxIndex;
use tessera_core::{CoreError, CoreResult, Currency, CurrencyAmount, Date, FxRate, ReferenceData};

use crate::trade::{decimal_to_f64, Resolvable, TradeInfo};

/// A non-deliverable forward: the difference between the agreed rate and
/// the index fixing is settled in the settlement currency.
///
/// The agreed rate is quoted in the convention of the index pair. A positive
/// notional receives the settlement currency and pays the non-deliverable
/// currency at the agreed rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FxNdf {
    /// Currency in which the forward settles.
    pub settlement_currency: Currency,
    /// Signed notional in the settlement currency.
    pub settlement_notional: Decimal,
    /// Agreed rate, quoted on the index pair.
    pub agreed_rate: Decimal,
    /// Index determining the settlement fixing.
    pub index: FxIndex,
    /// Unadjusted payment date.
    pub payment_date: Date,
    /// Adjustment applied to the payment date.
    pub payment_date_adjustment: BusinessDayAdjustment,
}

impl FxNdf {
    /// The currency of the index pair that is not the settlement currency.
    ///
    /// # Errors
    ///
    /// Fails if the settlement currency is not part of the index pair.
    pub fn non_deliverable_currency(&self) -> CoreResult<Currency> {
        self.index.pair.other(self.settlement_currency).ok_or_else(|| {
            CoreError::validation(format!(
                "Settlement currency {} must be one of the index currencies {}",
                self.settlement_currency, self.index.pair
            ))
        })
    }
}

impl Resolvable for FxNdf {
    type Resolved = ResolvedFxNdf;

    fn resolve(&self, ref_data: &ReferenceData) -> CoreResult<ResolvedFxNdf> {
        self.non_deliverable_currency()?;
        let notional = decimal_to_f64(self.settlement_notional, "settlementNotional")?;
        let quoted = FxRate::of(self.index.pair, decimal_to_f64(self.agreed_rate, "agreedRate")?)?;
        let agreed_fx_rate = if quoted.pair().base() == self.settlement_currency {
            quoted
        } else {
            quoted.inverse()
        };
        let payment_date = self
            .payment_date_adjustment
            .adjust(self.payment_date, ref_data)?;
        let fixing_date = self
            .index
            .fixing_date_from_maturity(payment_date, ref_data)?;

        Ok(ResolvedFxNdf {
            settlement_currency: self.settlement_currency,
            notional,
            agreed_fx_rate,
            index: self.index.clone(),
            fixing_date,
            payment_date,
        })
    }
}

/// An FX NDF resolved for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFxNdf {
    /// Settlement currency.
    pub settlement_currency: Currency,
    /// Signed notional in the settlement currency.
    pub notional: f64,
    /// Agreed rate on the pair settlement/non-deliverable.
    pub agreed_fx_rate: FxRate,
    /// Fixing index.
    pub index: FxIndex,
    /// Date the index fixes.
    pub fixing_date: Date,
    /// Adjusted payment date.
    pub payment_date: Date,
}

impl ResolvedFxNdf {
    /// The non-deliverable currency.
    #[must_use]
    pub fn non_deliverable_currency(&self) -> Currency {
        self.agreed_fx_rate.pair().counter()
    }

    /// The notional as an amount.
    #[must_use]
    pub fn settlement_currency_notional(&self) -> CurrencyAmount {
        CurrencyAmount::of(self.settlement_currency, self.notional)
    }
}

/// A trade in an FX NDF.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FxNdfTrade {
    /// Trade information.
    #[serde(default)]
    pub info: TradeInfo,
    /// The product traded.
    pub product: FxNdf,
}

impl FxNdfTrade {
    /// Creates a trade.
    #[must_use]
    pub fn of(info: TradeInfo, product: FxNdf) -> Self {
        Self { info, product }
    }
}

impl Resolvable for FxNdfTrade {
    type Resolved = ResolvedFxNdfTrade;

    fn resolve(&self, ref_data: &ReferenceData) -> CoreResult<ResolvedFxNdfTrade> {
        Ok(ResolvedFxNdfTrade {
            info: self.info.clone(),
            product: self.product.resolve(ref_data)?,
        })
    }
}

/// An FX NDF trade resolved for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFxNdfTrade {
    /// Trade information.
    pub info: TradeInfo,
    /// The resolved product.
    pub product: ResolvedFxNdf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use tessera_core::calendars::BusinessDayConvention;
    use tessera_core::CurrencyPair;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn usd_inr_ndf(settlement: Currency) -> FxNdf {
        FxNdf {
            settlement_currency: settlement,
            settlement_notional: dec!(1000000),
            agreed_rate: dec!(84),
            index: FxIndex::of(
                CurrencyPair::of(Currency::USD, Currency::INR).unwrap(),
                "SAT_SUN",
                2,
            ),
            // Sunday, rolls to Monday 16 June
            payment_date: date(2025, 6, 15),
            payment_date_adjustment: BusinessDayAdjustment::of(
                BusinessDayConvention::Following,
                "SAT_SUN",
            ),
        }
    }

    #[test]
    fn test_resolve_dates() {
        let resolved = usd_inr_ndf(Currency::USD)
            .resolve(&ReferenceData::standard())
            .unwrap();
        assert_eq!(resolved.payment_date, date(2025, 6, 16));
        assert_eq!(resolved.fixing_date, date(2025, 6, 12));
        assert_eq!(resolved.non_deliverable_currency(), Currency::INR);
        assert_relative_eq!(resolved.notional, 1_000_000.0);
    }

    #[test]
    fn test_agreed_rate_expressed_from_settlement_currency() {
        let mut ndf = usd_inr_ndf(Currency::INR);
        ndf.settlement_notional = dec!(84000000);
        let resolved = ndf.resolve(&ReferenceData::standard()).unwrap();
        assert_eq!(resolved.agreed_fx_rate.pair().base(), Currency::INR);
        assert_relative_eq!(resolved.agreed_fx_rate.rate(), 1.0 / 84.0);
        assert_eq!(resolved.non_deliverable_currency(), Currency::USD);
    }

    #[test]
    fn test_settlement_currency_outside_index() {
        let ndf = usd_inr_ndf(Currency::EUR);
        assert!(ndf.non_deliverable_currency().is_err());
        assert!(ndf.resolve(&ReferenceData::standard()).is_err());
    }

    #[test]
    fn test_non_positive_agreed_rate() {
        let mut ndf = usd_inr_ndf(Currency::USD);
        ndf.agreed_rate = dec!(0);
        let err = ndf.resolve(&ReferenceData::standard()).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn test_missing_calendar() {
        let mut ndf = usd_inr_ndf(Currency::USD);
        ndf.index.fixing_calendar = "INMU".into();
        let err = ndf.resolve(&ReferenceData::standard()).unwrap_err();
        assert!(matches!(err, CoreError::ReferenceDataNotFound { .. }));
    }

    #[test]
    fn test_trade_resolution_keeps_info() {
        let trade = FxNdfTrade::of(TradeInfo::with_id("NDF-1"), usd_inr_ndf(Currency::USD));
        let resolved = trade.resolve(&ReferenceData::standard()).unwrap();
        assert_eq!(resolved.info, trade.info);
    }
}
