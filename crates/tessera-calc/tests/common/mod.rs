//! Shared fixtures for the calculation tests.

#![allow(dead_code)]

use rust_decimal_macros::dec;

use tessera_calc::lookup::{DefaultIborFutureOptionMarketDataLookup, DefaultRatesMarketDataLookup};
use tessera_calc::parameters::CalculationParameters;
use tessera_core::calendars::BusinessDayAdjustment;
use tessera_core::index::{FxIndex, IborIndex};
use tessera_core::{Currency, CurrencyPair, Date, FxRate};
use tessera_market::curve::InterpolatedCurve;
use tessera_market::ids::{CurveId, VolatilitiesId};
use tessera_market::scenario::{ImmutableScenarioMarketData, ImmutableScenarioMarketDataBuilder};
use tessera_market::volatility::NormalIborFutureOptionVolatilities;
use tessera_products::fx::{FxNdf, FxNdfTrade};
use tessera_products::future::{IborFuture, IborFutureOption, IborFutureOptionTrade, PutCall};
use tessera_products::TradeInfo;

/// Routes `tracing` output to the test harness, honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

pub fn valuation() -> Date {
    date(2025, 1, 15)
}

pub fn eur_usd() -> CurrencyPair {
    CurrencyPair::of(Currency::EUR, Currency::USD).unwrap()
}

/// Receives USD 10m against EUR at 1.10 in one year.
pub fn ndf_trade() -> FxNdfTrade {
    FxNdfTrade::of(
        TradeInfo::with_id("NDF-1"),
        FxNdf {
            settlement_currency: Currency::USD,
            settlement_notional: dec!(10000000),
            agreed_rate: dec!(1.10),
            index: FxIndex::of(eur_usd(), "SAT_SUN", 2),
            payment_date: date(2026, 1, 15),
            payment_date_adjustment: BusinessDayAdjustment::none(),
        },
    )
}

/// An option on the June 2025 Euribor future.
pub fn option_trade(expiration_date: Date) -> IborFutureOptionTrade {
    IborFutureOptionTrade {
        info: TradeInfo::with_id("OPT-1"),
        product: IborFutureOption {
            put_call: PutCall::Call,
            expiration_date,
            strike_price: dec!(0.975),
            underlying_future: IborFuture {
                currency: Currency::EUR,
                notional: dec!(1000000),
                accrual_factor: dec!(0.25),
                last_trade_date: date(2025, 6, 16),
                index: IborIndex::EurEuribor3M,
            },
        },
        quantity: dec!(20),
    }
}

pub fn option_expiry() -> Date {
    date(2025, 6, 13)
}

pub fn rates_lookup() -> DefaultRatesMarketDataLookup {
    DefaultRatesMarketDataLookup::of(
        [
            (Currency::USD, CurveId::new("USD-Disc")),
            (Currency::EUR, CurveId::new("EUR-Disc")),
        ],
        [(IborIndex::EurEuribor3M, CurveId::new("EUR-3M"))],
    )
}

pub fn parameters() -> CalculationParameters {
    CalculationParameters::empty()
        .with(rates_lookup().into_parameter())
        .with(
            DefaultIborFutureOptionMarketDataLookup::of([(
                IborIndex::EurEuribor3M,
                VolatilitiesId::new("EUR-Vols"),
            )])
            .into_parameter(),
        )
}

pub fn usd_curve(rate: f64) -> InterpolatedCurve {
    InterpolatedCurve::new("USD-Disc", Currency::USD, valuation(), vec![0.5, 1.0, 2.0], vec![rate, rate, rate])
        .unwrap()
}

fn eur_curves() -> [InterpolatedCurve; 2] {
    [
        InterpolatedCurve::new("EUR-Disc", Currency::EUR, valuation(), vec![0.5, 1.0, 2.0], vec![0.02, 0.021, 0.022])
            .unwrap(),
        InterpolatedCurve::new("EUR-3M", Currency::EUR, valuation(), vec![0.25, 1.0, 2.0], vec![0.025, 0.026, 0.027])
            .unwrap(),
    ]
}

fn eur_vols() -> NormalIborFutureOptionVolatilities {
    NormalIborFutureOptionVolatilities::flat("EUR-Vols", IborIndex::EurEuribor3M, valuation(), 0.008).unwrap()
}

fn base_builder() -> ImmutableScenarioMarketDataBuilder {
    let [eur_disc, eur_3m] = eur_curves();
    ImmutableScenarioMarketData::builder(valuation())
        .add_curve(eur_disc)
        .add_curve(eur_3m)
        .add_fx_rate(FxRate::of(eur_usd(), 1.08).unwrap())
}

/// Single scenario market data holding everything both trades need.
pub fn market_data() -> ImmutableScenarioMarketData {
    base_builder()
        .add_curve(usd_curve(0.045))
        .add_volatilities(eur_vols())
        .build()
        .unwrap()
}

/// Market data without the option volatilities.
pub fn market_data_without_vols() -> ImmutableScenarioMarketData {
    base_builder().add_curve(usd_curve(0.045)).build().unwrap()
}

/// Market data without the USD discount curve.
pub fn market_data_without_usd_curve() -> ImmutableScenarioMarketData {
    base_builder().add_volatilities(eur_vols()).build().unwrap()
}

/// Three scenarios, differing only in the USD discount curve.
pub fn scenario_market_data(usd_rates: &[f64]) -> ImmutableScenarioMarketData {
    base_builder()
        .add_scenario_values(CurveId::new("USD-Disc"), usd_rates.iter().map(|rate| usd_curve(*rate)))
        .add_volatilities(eur_vols())
        .build()
        .unwrap()
}

/// Market data holding volatilities under the USD discount curve name.
pub fn market_data_with_volatilities_as_usd_curve() -> ImmutableScenarioMarketData {
    base_builder()
        .add_value(CurveId::new("USD-Disc"), eur_vols())
        .add_volatilities(eur_vols())
        .build()
        .unwrap()
}
