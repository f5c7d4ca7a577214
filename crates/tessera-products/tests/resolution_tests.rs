//! Resolution of trades against reference data.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tessera_core::calendars::{BusinessDayAdjustment, BusinessDayConvention};
use tessera_core::index::{FxIndex, IborIndex};
use tessera_core::{Currency, CurrencyPair, Date, ReferenceData};
use tessera_products::fx::FxNdf;
use tessera_products::future::{IborFuture, IborFutureOption, PutCall};
use tessera_products::Resolvable;

fn base_date() -> Date {
    // Monday
    Date::from_ymd(2025, 6, 16).unwrap()
}

fn eur_usd_ndf(settlement_currency: Currency, agreed_rate: Decimal, payment_date: Date) -> FxNdf {
    FxNdf {
        settlement_currency,
        settlement_notional: dec!(5000000),
        agreed_rate,
        index: FxIndex::of(CurrencyPair::of(Currency::EUR, Currency::USD).unwrap(), "SAT_SUN", 2),
        payment_date,
        payment_date_adjustment: BusinessDayAdjustment::of(BusinessDayConvention::Following, "SAT_SUN"),
    }
}

fn future(last_trade_date: Date) -> IborFuture {
    IborFuture {
        currency: Currency::EUR,
        notional: dec!(1000000),
        accrual_factor: dec!(0.25),
        last_trade_date,
        index: IborIndex::EurEuribor3M,
    }
}

#[test]
fn test_future_accrual_period() {
    let resolved = future(base_date()).resolve(&ReferenceData::standard()).unwrap();
    assert_eq!(resolved.fixing_date, base_date());
    assert_eq!(resolved.accrual_start, Date::from_ymd(2025, 6, 18).unwrap());
    assert_eq!(resolved.accrual_end, Date::from_ymd(2025, 9, 18).unwrap());
    assert_relative_eq!(resolved.index_accrual, 92.0 / 360.0, epsilon = 1e-12);
}

proptest! {
    #[test]
    fn prop_option_expiry_must_not_follow_last_trade(weeks in 0i64..104, offset in -30i64..30) {
        let last_trade_date = base_date().add_days(7 * weeks);
        let option = IborFutureOption {
            put_call: PutCall::Put,
            expiration_date: last_trade_date.add_days(offset),
            strike_price: dec!(0.98),
            underlying_future: future(last_trade_date),
        };
        let resolved = option.resolve(&ReferenceData::standard());
        prop_assert_eq!(resolved.is_ok(), offset <= 0);
    }

    #[test]
    fn prop_ndf_dates_are_business_days(days in 0i64..730) {
        let unadjusted = base_date().add_days(days);
        let resolved = eur_usd_ndf(Currency::USD, dec!(1.1), unadjusted)
            .resolve(&ReferenceData::standard())
            .unwrap();
        prop_assert!(!resolved.payment_date.is_weekend());
        prop_assert!(!resolved.fixing_date.is_weekend());
        prop_assert!(resolved.payment_date >= unadjusted);
        prop_assert!(unadjusted.days_between(&resolved.payment_date) <= 2);
        let lag = resolved.fixing_date.days_between(&resolved.payment_date);
        prop_assert!((2..=4).contains(&lag), "lag {}", lag);
    }

    #[test]
    fn prop_ndf_agreed_rate_quoted_from_settlement(cents in 50i64..200, settle_usd in any::<bool>()) {
        let rate = Decimal::new(cents, 2);
        let settlement_currency = if settle_usd { Currency::USD } else { Currency::EUR };
        let resolved = eur_usd_ndf(settlement_currency, rate, base_date())
            .resolve(&ReferenceData::standard())
            .unwrap();
        let quoted = cents as f64 / 100.0;
        prop_assert_eq!(resolved.agreed_fx_rate.pair().base(), settlement_currency);
        let expected = if settle_usd { 1.0 / quoted } else { quoted };
        prop_assert!((resolved.agreed_fx_rate.rate() - expected).abs() < 1e-12);
    }
}
