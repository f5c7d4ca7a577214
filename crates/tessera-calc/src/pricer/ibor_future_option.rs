//! Normal model pricer for margined Ibor future options.

use std::collections::BTreeSet;

use statrs::distribution::{Continuous, ContinuousCDF, Normal};

use tessera_core::CurrencyAmount;
use tessera_market::sensitivity::CurrencyParameterSensitivities;
use tessera_market::volatility::NormalIborFutureOptionVolatilities;
use tessera_products::future::{PutCall, ResolvedIborFuture, ResolvedIborFutureOption, ResolvedIborFutureOptionTrade};

use crate::error::{CalcError, CalcResult};
use crate::lookup::RatesProvider;
use crate::pricer::sensitivity::bucketed_pv01;

/// Prices Ibor future options with the Bachelier model on the future price.
///
/// The future price is one minus the forward rate of the underlying index
/// period. Options are margined, so prices are not discounted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalIborFutureOptionPricer;

impl NormalIborFutureOptionPricer {
    /// Creates the pricer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Price of the underlying future.
    ///
    /// # Errors
    ///
    /// Fails if the forward curve of the index is unavailable.
    pub fn future_price(&self, future: &ResolvedIborFuture, provider: &RatesProvider) -> CalcResult<f64> {
        let curve = provider.forward_curve(future.index)?;
        let rate = curve.simple_forward_rate(future.accrual_start, future.accrual_end, future.index_accrual)?;
        Ok(1.0 - rate)
    }

    /// Price of one option, in price terms.
    ///
    /// # Errors
    ///
    /// Fails if market data is unavailable.
    pub fn unit_price(
        &self,
        option: &ResolvedIborFutureOption,
        provider: &RatesProvider,
        volatilities: &NormalIborFutureOptionVolatilities,
    ) -> CalcResult<f64> {
        let forward = self.future_price(&option.underlying_future, provider)?;
        let expiry = volatilities.relative_time(option.expiration_date).max(0.0);
        let sigma = volatilities.volatility(expiry);
        bachelier_price(option.put_call, forward, option.strike_price, sigma, expiry)
    }

    /// Present value of the trade in the option currency.
    ///
    /// # Errors
    ///
    /// Fails if market data is unavailable.
    pub fn present_value(
        &self,
        trade: &ResolvedIborFutureOptionTrade,
        provider: &RatesProvider,
        volatilities: &NormalIborFutureOptionVolatilities,
    ) -> CalcResult<CurrencyAmount> {
        let option = &trade.product;
        let future = &option.underlying_future;
        let price = self.unit_price(option, provider, volatilities)?;
        Ok(CurrencyAmount::of(
            option.currency(),
            trade.quantity * future.notional * future.accrual_factor * price,
        ))
    }

    /// PV01 to each node of the forward curve, volatilities held fixed.
    ///
    /// # Errors
    ///
    /// Fails if market data is unavailable.
    pub fn pv01_bucketed(
        &self,
        trade: &ResolvedIborFutureOptionTrade,
        provider: &RatesProvider,
        volatilities: &NormalIborFutureOptionVolatilities,
    ) -> CalcResult<CurrencyParameterSensitivities> {
        let index = trade.product.underlying_future.index;
        let curves = BTreeSet::from([provider.forward_curve(index)?.name().clone()]);
        bucketed_pv01(provider, &curves, trade.product.currency(), |bumped| {
            Ok(self.present_value(trade, bumped, volatilities)?.amount)
        })
    }
}

/// Undiscounted Bachelier price; intrinsic value when `sigma * sqrt(t)` is zero.
fn bachelier_price(put_call: PutCall, forward: f64, strike: f64, sigma: f64, t: f64) -> CalcResult<f64> {
    if !forward.is_finite() || !sigma.is_finite() || sigma < 0.0 {
        return Err(CalcError::calculation(format!(
            "invalid normal model inputs: forward {forward}, volatility {sigma}"
        )));
    }
    let intrinsic = match put_call {
        PutCall::Call => (forward - strike).max(0.0),
        PutCall::Put => (strike - forward).max(0.0),
    };
    let std_dev = sigma * t.sqrt();
    if std_dev <= 0.0 {
        return Ok(intrinsic);
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| CalcError::calculation(e.to_string()))?;
    let d = (forward - strike) / std_dev;
    let price = match put_call {
        PutCall::Call => (forward - strike) * normal.cdf(d) + std_dev * normal.pdf(d),
        PutCall::Put => (strike - forward) * normal.cdf(-d) + std_dev * normal.pdf(d),
    };
    Ok(price)
}
