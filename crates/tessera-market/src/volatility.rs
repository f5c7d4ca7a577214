//! Normal volatilities for Ibor future options.

use serde::{Deserialize, Serialize};

use tessera_core::daycounts::{Act365Fixed, DayCount};
use tessera_core::index::IborIndex;
use tessera_core::Date;

use crate::error::{MarketDataError, MarketDataResult};
use crate::ids::VolatilitiesId;
use crate::interpolation::{linear_flat, validate_nodes};

/// Normal (Bachelier) volatilities by option expiry for one Ibor index.
///
/// Volatilities are expressed in price terms and interpolated linearly in
/// expiry time (ACT/365F from the valuation date), flat outside the nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalIborFutureOptionVolatilities {
    name: VolatilitiesId,
    index: IborIndex,
    valuation_date: Date,
    expiries: Vec<f64>,
    volatilities: Vec<f64>,
}

impl NormalIborFutureOptionVolatilities {
    /// Creates volatilities from expiry nodes.
    ///
    /// # Errors
    ///
    /// Fails on invalid nodes or a negative volatility.
    pub fn new(
        name: impl Into<VolatilitiesId>,
        index: IborIndex,
        valuation_date: Date,
        expiries: Vec<f64>,
        volatilities: Vec<f64>,
    ) -> MarketDataResult<Self> {
        validate_nodes(&expiries, &volatilities)?;
        if let Some(negative) = volatilities.iter().find(|vol| **vol < 0.0) {
            return Err(MarketDataError::invalid(format!(
                "volatility must not be negative, found {negative}"
            )));
        }
        Ok(Self {
            name: name.into(),
            index,
            valuation_date,
            expiries,
            volatilities,
        })
    }

    /// A single volatility for all expiries.
    ///
    /// # Errors
    ///
    /// Fails on a negative or non-finite volatility.
    pub fn flat(
        name: impl Into<VolatilitiesId>,
        index: IborIndex,
        valuation_date: Date,
        volatility: f64,
    ) -> MarketDataResult<Self> {
        Self::new(name, index, valuation_date, vec![1.0], vec![volatility])
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &VolatilitiesId {
        &self.name
    }

    /// Returns the index the volatilities apply to.
    #[must_use]
    pub fn index(&self) -> IborIndex {
        self.index
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Year fraction from the valuation date to an expiry date.
    #[must_use]
    pub fn relative_time(&self, date: Date) -> f64 {
        Act365Fixed.year_fraction(self.valuation_date, date)
    }

    /// Normal volatility for an expiry time.
    #[must_use]
    pub fn volatility(&self, expiry: f64) -> f64 {
        linear_flat(&self.expiries, &self.volatilities, expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_volatility_interpolation() {
        let vols = NormalIborFutureOptionVolatilities::new(
            "USD-LIBOR-3M-Vols",
            IborIndex::UsdLibor3M,
            Date::from_ymd(2025, 1, 15).unwrap(),
            vec![0.25, 1.0],
            vec![0.008, 0.010],
        )
        .unwrap();
        assert_relative_eq!(vols.volatility(0.1), 0.008);
        assert_relative_eq!(vols.volatility(0.625), 0.009, epsilon = 1e-15);
        assert_relative_eq!(vols.volatility(2.0), 0.010);
    }

    #[test]
    fn test_negative_volatility_rejected() {
        let result = NormalIborFutureOptionVolatilities::flat(
            "V",
            IborIndex::UsdLibor3M,
            Date::from_ymd(2025, 1, 15).unwrap(),
            -0.01,
        );
        assert!(result.is_err());
    }
}
