//! Sensitivities to curve parameters.

use serde::{Deserialize, Serialize};

use tessera_core::{Currency, CurrencyAmount};

use crate::ids::CurveId;

/// Sensitivity of a value to each parameter of one curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyParameterSensitivity {
    /// Curve the parameters belong to.
    pub curve: CurveId,
    /// Currency of the sensitivity amounts.
    pub currency: Currency,
    /// One amount per curve parameter.
    pub sensitivity: Vec<f64>,
}

impl CurrencyParameterSensitivity {
    /// Sum over all parameters.
    #[must_use]
    pub fn total(&self) -> CurrencyAmount {
        CurrencyAmount::of(self.currency, self.sensitivity.iter().sum())
    }
}

/// Sensitivities to several curves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrencyParameterSensitivities {
    sensitivities: Vec<CurrencyParameterSensitivity>,
}

impl CurrencyParameterSensitivities {
    /// Creates from individual curve sensitivities, sorted by curve.
    pub fn of(sensitivities: impl IntoIterator<Item = CurrencyParameterSensitivity>) -> Self {
        let mut sensitivities: Vec<_> = sensitivities.into_iter().collect();
        sensitivities.sort_by(|a, b| a.curve.cmp(&b.curve).then(a.currency.cmp(&b.currency)));
        Self { sensitivities }
    }

    /// The per-curve sensitivities.
    #[must_use]
    pub fn sensitivities(&self) -> &[CurrencyParameterSensitivity] {
        &self.sensitivities
    }

    /// Finds the sensitivity to a curve.
    #[must_use]
    pub fn find(&self, curve: &CurveId) -> Option<&CurrencyParameterSensitivity> {
        self.sensitivities.iter().find(|s| &s.curve == curve)
    }

    /// Sum of every parameter of every curve, in `currency`.
    ///
    /// Amounts in other currencies are ignored.
    #[must_use]
    pub fn total(&self, currency: Currency) -> CurrencyAmount {
        let sum = self
            .sensitivities
            .iter()
            .filter(|s| s.currency == currency)
            .map(|s| s.total().amount)
            .sum();
        CurrencyAmount::of(currency, sum)
    }
}
