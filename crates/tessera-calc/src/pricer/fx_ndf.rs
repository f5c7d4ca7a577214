//! Discounting pricer for FX non-deliverable forwards.

use std::collections::BTreeSet;

use tessera_core::{CurrencyAmount, CurrencyPair, FxRate, MultiCurrencyAmount};
use tessera_market::sensitivity::CurrencyParameterSensitivities;
use tessera_products::fx::ResolvedFxNdf;

use crate::error::CalcResult;
use crate::lookup::RatesProvider;
use crate::pricer::sensitivity::bucketed_pv01;

/// Prices an NDF by discounting its settlement amount.
///
/// The forward rate on the pair settlement/non-deliverable follows from the
/// spot rate and the discount factors of both currencies at the payment date:
/// `F = spot * DF_settle / DF_other`. With agreed rate `K` and notional `N`
/// the amount paid in the settlement currency is `N * (1 - K / F)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountingFxNdfPricer;

impl DiscountingFxNdfPricer {
    /// Creates the pricer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Forward rate at the payment date, quoted settlement/non-deliverable.
    ///
    /// # Errors
    ///
    /// Fails if a discount curve or the spot rate is unavailable.
    pub fn forward_fx_rate(&self, ndf: &ResolvedFxNdf, provider: &RatesProvider) -> CalcResult<FxRate> {
        let settle = ndf.settlement_currency;
        let other = ndf.non_deliverable_currency();
        let spot = provider.fx_rate(settle, other)?;
        let df_settle = provider.discount_factor(settle, ndf.payment_date)?;
        let df_other = provider.discount_factor(other, ndf.payment_date)?;
        let pair = CurrencyPair::of(settle, other)?;
        Ok(FxRate::of(pair, spot * df_settle / df_other)?)
    }

    /// Present value in the settlement currency.
    ///
    /// An NDF paid before the valuation date has no value.
    ///
    /// # Errors
    ///
    /// Fails if market data is unavailable.
    pub fn present_value(&self, ndf: &ResolvedFxNdf, provider: &RatesProvider) -> CalcResult<CurrencyAmount> {
        let settle = ndf.settlement_currency;
        if ndf.payment_date < provider.valuation_date() {
            return Ok(CurrencyAmount::zero(settle));
        }
        let forward = self.forward_fx_rate(ndf, provider)?.rate();
        let agreed = ndf.agreed_fx_rate.rate();
        let df = provider.discount_factor(settle, ndf.payment_date)?;
        Ok(CurrencyAmount::of(settle, ndf.notional * (1.0 - agreed / forward) * df))
    }

    /// Exposure to each currency of the pair.
    ///
    /// The settlement leg is `N * DF_settle`, the non-deliverable leg
    /// `-N * K * DF_other`.
    ///
    /// # Errors
    ///
    /// Fails if a discount curve is unavailable.
    pub fn currency_exposure(
        &self,
        ndf: &ResolvedFxNdf,
        provider: &RatesProvider,
    ) -> CalcResult<MultiCurrencyAmount> {
        let settle = ndf.settlement_currency;
        let other = ndf.non_deliverable_currency();
        if ndf.payment_date < provider.valuation_date() {
            return Ok(MultiCurrencyAmount::of([
                CurrencyAmount::zero(settle),
                CurrencyAmount::zero(other),
            ]));
        }
        let df_settle = provider.discount_factor(settle, ndf.payment_date)?;
        let df_other = provider.discount_factor(other, ndf.payment_date)?;
        let agreed = ndf.agreed_fx_rate.rate();
        Ok(MultiCurrencyAmount::of([
            CurrencyAmount::of(settle, ndf.notional * df_settle),
            CurrencyAmount::of(other, -ndf.notional * agreed * df_other),
        ]))
    }

    /// Cash settled on the valuation date, zero on any other day.
    ///
    /// # Errors
    ///
    /// Fails if market data is unavailable on the payment date.
    pub fn current_cash(&self, ndf: &ResolvedFxNdf, provider: &RatesProvider) -> CalcResult<CurrencyAmount> {
        if ndf.payment_date == provider.valuation_date() {
            return self.present_value(ndf, provider);
        }
        Ok(CurrencyAmount::zero(ndf.settlement_currency))
    }

    /// PV01 to each node of the two discount curves.
    ///
    /// # Errors
    ///
    /// Fails if market data is unavailable.
    pub fn pv01_bucketed(
        &self,
        ndf: &ResolvedFxNdf,
        provider: &RatesProvider,
    ) -> CalcResult<CurrencyParameterSensitivities> {
        let curves = BTreeSet::from([
            provider.discount_curve(ndf.settlement_currency)?.name().clone(),
            provider.discount_curve(ndf.non_deliverable_currency())?.name().clone(),
        ]);
        bucketed_pv01(provider, &curves, ndf.settlement_currency, |bumped| {
            Ok(self.present_value(ndf, bumped)?.amount)
        })
    }
}
