//! End-to-end tests of calculation dispatch.

mod common;

use std::collections::BTreeSet;

use approx::assert_relative_eq;

use tessera_calc::prelude::*;
use tessera_core::{Currency, ReferenceData};
use tessera_market::ids::{CurveId, MarketDataId, VolatilitiesId};
use tessera_market::requirements::Presence;
use tessera_market::MarketDataError;
use tessera_products::Resolvable;

use common::*;

fn measures(list: &[Measure]) -> BTreeSet<Measure> {
    list.iter().copied().collect()
}

#[test]
fn test_result_keys_match_request() {
    init_tracing();
    let functions = CalculationFunctions::standard();
    let target = CalculationTarget::from(ndf_trade());
    let requested = measures(&Measure::ALL);

    let results = functions
        .calculate(&target, &requested, &parameters(), &market_data(), &ReferenceData::standard())
        .unwrap();

    let keys: BTreeSet<_> = results.keys().copied().collect();
    assert_eq!(keys, requested);
}

#[test]
fn test_unsupported_measure_is_isolated() {
    init_tracing();
    let requested = measures(&[Measure::PresentValue, Measure::CurrencyExposure, Measure::UnitPrice]);
    let results = FxNdfTradeCalculationFunction::new()
        .calculate(&ndf_trade(), &requested, &parameters(), &market_data(), &ReferenceData::standard())
        .unwrap();

    assert_eq!(results.len(), 3);
    let failure = results[&Measure::UnitPrice].as_ref().unwrap_err();
    assert_eq!(failure.reason, FailureReason::Unsupported);
    assert!(failure.message.contains("FxNdfTrade"));
    assert!(failure.message.contains("UnitPrice"));

    let pv = results[&Measure::PresentValue].as_ref().unwrap();
    let pv = pv.as_amounts().unwrap();
    assert_eq!(pv.currency(), Currency::USD);
    assert_eq!(pv.scenario_count(), 1);

    let exposure = results[&Measure::CurrencyExposure].as_ref().unwrap();
    let exposure = exposure.as_multi_currency_amounts().unwrap().get(0).unwrap();
    assert!(exposure.amount(Currency::USD) > 0.0);
    assert!(exposure.amount(Currency::EUR) < 0.0);
}

#[test]
fn test_option_expiring_after_last_trade_fails_resolution() {
    init_tracing();
    let trade = option_trade(date(2025, 6, 17));
    let err = IborFutureOptionTradeCalculationFunction::new()
        .calculate(
            &trade,
            &measures(&[Measure::PresentValue, Measure::ResolvedTarget]),
            &parameters(),
            &market_data(),
            &ReferenceData::standard(),
        )
        .unwrap_err();

    match err {
        CalcError::Resolution { target, source } => {
            assert_eq!(target, "IborFutureOptionTrade");
            assert!(source.to_string().contains("expirationDate"));
        }
        other => panic!("expected resolution error, got {other:?}"),
    }
}

#[test]
fn test_resolution_failure_reported_before_missing_parameters() {
    let err = IborFutureOptionTradeCalculationFunction::new()
        .calculate(
            &option_trade(date(2025, 6, 17)),
            &measures(&[Measure::PresentValue]),
            &CalculationParameters::empty(),
            &market_data(),
            &ReferenceData::standard(),
        )
        .unwrap_err();
    assert!(
        matches!(&err, CalcError::Resolution { target, .. } if target == "IborFutureOptionTrade"),
        "{err:?}"
    );
}

#[test]
fn test_unknown_calendar_fails_resolution() {
    let err = FxNdfTradeCalculationFunction::new()
        .calculate(
            &ndf_trade(),
            &measures(&[Measure::PresentValue]),
            &parameters(),
            &market_data(),
            &ReferenceData::empty(),
        )
        .unwrap_err();
    assert!(matches!(err, CalcError::Resolution { .. }));
}

#[test]
fn test_resolved_target_measure() {
    let ref_data = ReferenceData::standard();
    let trade = option_trade(option_expiry());
    let results = IborFutureOptionTradeCalculationFunction::new()
        .calculate(&trade, &measures(&[Measure::ResolvedTarget]), &parameters(), &market_data(), &ref_data)
        .unwrap();

    let value = results[&Measure::ResolvedTarget].as_ref().unwrap();
    let expected = ResolvedTarget::from(trade.resolve(&ref_data).unwrap());
    assert_eq!(value.as_resolved_target(), Some(&expected));
}

#[test]
fn test_missing_curve_fails_dependent_measures_only() {
    init_tracing();
    let requested = measures(&[
        Measure::PresentValue,
        Measure::ForwardFxRate,
        Measure::CurrentCash,
        Measure::ResolvedTarget,
    ]);
    let results = FxNdfTradeCalculationFunction::new()
        .calculate(
            &ndf_trade(),
            &requested,
            &parameters(),
            &market_data_without_usd_curve(),
            &ReferenceData::standard(),
        )
        .unwrap();

    assert_eq!(results.len(), 4);
    for measure in [Measure::PresentValue, Measure::ForwardFxRate] {
        let failure = results[&measure].as_ref().unwrap_err();
        assert_eq!(failure.reason, FailureReason::MissingData, "{measure}");
        assert!(failure.message.contains("USD-Disc"));
    }
    assert!(results[&Measure::ResolvedTarget].is_ok());
}

#[test]
fn test_missing_volatilities_fail_option_measures() {
    let requested = measures(&[Measure::PresentValue, Measure::UnitPrice, Measure::ResolvedTarget]);
    let results = IborFutureOptionTradeCalculationFunction::new()
        .calculate(
            &option_trade(option_expiry()),
            &requested,
            &parameters(),
            &market_data_without_vols(),
            &ReferenceData::standard(),
        )
        .unwrap();

    assert_eq!(results[&Measure::PresentValue].as_ref().unwrap_err().reason, FailureReason::MissingData);
    assert_eq!(results[&Measure::UnitPrice].as_ref().unwrap_err().reason, FailureReason::MissingData);
    assert!(results[&Measure::ResolvedTarget].is_ok());
}

#[test]
fn test_option_present_value_scales_unit_price() {
    let trade = option_trade(option_expiry());
    let results = IborFutureOptionTradeCalculationFunction::new()
        .calculate(
            &trade,
            &measures(&[Measure::PresentValue, Measure::UnitPrice, Measure::Pv01CalibratedSum]),
            &parameters(),
            &market_data(),
            &ReferenceData::standard(),
        )
        .unwrap();

    let price = *results[&Measure::UnitPrice].as_ref().unwrap().as_values().unwrap().get(0).unwrap();
    let pv = results[&Measure::PresentValue].as_ref().unwrap().as_amounts().unwrap().get(0).unwrap();
    assert!(price > 0.0);
    assert_eq!(pv.currency, Currency::EUR);
    // 20 contracts of 1m notional with accrual 0.25
    assert_relative_eq!(pv.amount, 20.0 * 1_000_000.0 * 0.25 * price, epsilon = 1e-6);

    // Rates up, future price down, call value down
    let pv01 = results[&Measure::Pv01CalibratedSum].as_ref().unwrap();
    let pv01 = pv01.as_multi_currency_amounts().unwrap().get(0).unwrap();
    assert!(pv01.amount(Currency::EUR) < 0.0);
}

#[test]
fn test_requirements_ignore_measures_and_are_stable() {
    let function = IborFutureOptionTradeCalculationFunction::new();
    let trade = option_trade(option_expiry());
    let ref_data = ReferenceData::standard();
    let params = parameters();

    let first = function
        .requirements(&trade, &measures(&[Measure::PresentValue]), &params, &ref_data)
        .unwrap();
    let second = function
        .requirements(&trade, &measures(&[Measure::ResolvedTarget]), &params, &ref_data)
        .unwrap();
    assert_eq!(first, second);

    for id in [
        MarketDataId::Curve(CurveId::new("EUR-Disc")),
        MarketDataId::Curve(CurveId::new("EUR-3M")),
        MarketDataId::Volatilities(VolatilitiesId::new("EUR-Vols")),
    ] {
        assert_eq!(first.presence(&id), Some(Presence::Required), "{id:?}");
    }
    assert!(first.currencies().contains(&Currency::EUR));
}

#[test]
fn test_requirements_cover_market_data() {
    let functions = CalculationFunctions::standard();
    let targets = [
        CalculationTarget::from(ndf_trade()),
        CalculationTarget::from(option_trade(option_expiry())),
    ];
    let reqs = functions
        .requirements_all(
            &targets,
            &measures(&[Measure::PresentValue]),
            &parameters(),
            &ReferenceData::standard(),
        )
        .unwrap();

    assert!(reqs.missing_from(&market_data()).is_empty());
    assert_eq!(
        reqs.missing_from(&market_data_without_vols()),
        vec![MarketDataId::Volatilities(VolatilitiesId::new("EUR-Vols"))]
    );
}

#[test]
fn test_missing_parameter_fails_whole_calculation() {
    let err = FxNdfTradeCalculationFunction::new()
        .calculate(
            &ndf_trade(),
            &measures(&[Measure::PresentValue]),
            &CalculationParameters::empty(),
            &market_data(),
            &ReferenceData::standard(),
        )
        .unwrap_err();
    assert_eq!(err, CalcError::NotConfigured { parameter: "RatesMarketDataLookup" });
}

#[test]
fn test_wrong_kind_of_market_data_fails_whole_calculation() {
    let err = FxNdfTradeCalculationFunction::new()
        .calculate(
            &ndf_trade(),
            &measures(&[Measure::PresentValue, Measure::ForwardFxRate]),
            &parameters(),
            &market_data_with_volatilities_as_usd_curve(),
            &ReferenceData::standard(),
        )
        .unwrap_err();
    assert_eq!(
        err,
        CalcError::MarketData(MarketDataError::WrongType {
            id: MarketDataId::Curve(CurveId::new("USD-Disc")),
            expected: "curve",
        })
    );
}

#[test]
fn test_scenarios_produce_one_value_each() {
    init_tracing();
    let rates = [0.03, 0.045, 0.06];
    let requested = measures(&[Measure::PresentValue, Measure::ForwardFxRate, Measure::ResolvedTarget]);
    let function = FxNdfTradeCalculationFunction::new();
    let ref_data = ReferenceData::standard();

    let results = function
        .calculate(&ndf_trade(), &requested, &parameters(), &scenario_market_data(&rates), &ref_data)
        .unwrap();
    let pv = results[&Measure::PresentValue].as_ref().unwrap().as_amounts().unwrap().clone();
    let forwards = results[&Measure::ForwardFxRate].as_ref().unwrap().as_fx_rates().unwrap().clone();
    assert_eq!(pv.scenario_count(), 3);
    assert_eq!(forwards.scenario_count(), 3);

    // The middle scenario matches the base market data
    let base = function
        .calculate(&ndf_trade(), &requested, &parameters(), &market_data(), &ref_data)
        .unwrap();
    let base_pv = base[&Measure::PresentValue].as_ref().unwrap().as_amounts().unwrap().values()[0];
    assert_relative_eq!(pv.values()[1], base_pv, epsilon = 1e-6);
    assert!((pv.values()[0] - pv.values()[2]).abs() > 1.0);
}

#[test]
fn test_calculate_all_isolates_targets() {
    init_tracing();
    let targets = vec![
        CalculationTarget::from(ndf_trade()),
        CalculationTarget::from(option_trade(date(2025, 6, 17))),
        CalculationTarget::from(option_trade(option_expiry())),
    ];
    let requested = measures(&[Measure::PresentValue, Measure::UnitPrice]);

    let batch = CalculationFunctions::standard().calculate_all(
        &targets,
        &requested,
        &parameters(),
        &market_data(),
        &ReferenceData::standard(),
    );

    assert_eq!(batch.outputs.len(), 3);
    assert_eq!(batch.succeeded, 2);
    assert_eq!(batch.failed, 1);
    // UnitPrice is not supported on the NDF
    assert_eq!(batch.measure_failures, 1);
    assert!(batch.outputs[0].is_ok());
    assert!(matches!(batch.outputs[1], Err(CalcError::Resolution { .. })));
    assert!(batch.outputs[2].as_ref().unwrap()[&Measure::UnitPrice].is_ok());
}

#[test]
fn test_configured_calculation() {
    let config = CalculationConfig::from_toml_str(
        r#"
measures = ["PresentValue", "CurrentCash"]

[rates.discount_curves]
USD = "USD-Disc"
EUR = "EUR-Disc"
"#,
    )
    .unwrap();
    let results = FxNdfTradeCalculationFunction::new()
        .calculate(
            &ndf_trade(),
            &config.requested_measures().unwrap(),
            &config.to_parameters().unwrap(),
            &market_data(),
            &ReferenceData::standard(),
        )
        .unwrap();

    assert_eq!(results.len(), 2);
    let cash = results[&Measure::CurrentCash].as_ref().unwrap().as_amounts().unwrap();
    assert_relative_eq!(cash.values()[0], 0.0);
}
