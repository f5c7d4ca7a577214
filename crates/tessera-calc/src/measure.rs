//! Measures: the analytic outputs a caller can request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// An analytic output that can be requested for a target.
///
/// The set is closed. A calculation function declares which measures it
/// supports; requesting any other measure fails for that measure only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Measure {
    /// Present value of the target.
    PresentValue,
    /// Sum of the PV01 to calibrated curve parameters.
    #[serde(rename = "PV01CalibratedSum")]
    Pv01CalibratedSum,
    /// PV01 to each calibrated curve parameter.
    #[serde(rename = "PV01CalibratedBucketed")]
    Pv01CalibratedBucketed,
    /// Sum of the PV01 to curve market quotes.
    #[serde(rename = "PV01MarketQuoteSum")]
    Pv01MarketQuoteSum,
    /// PV01 to each curve market quote.
    #[serde(rename = "PV01MarketQuoteBucketed")]
    Pv01MarketQuoteBucketed,
    /// Exposure to each currency.
    CurrencyExposure,
    /// Cash paid or received on the valuation date.
    CurrentCash,
    /// Forward FX rate at the payment date.
    ForwardFxRate,
    /// Price of one unit of the product.
    UnitPrice,
    /// The resolved target itself.
    ResolvedTarget,
}

impl Measure {
    /// Every measure.
    pub const ALL: [Measure; 10] = [
        Measure::PresentValue,
        Measure::Pv01CalibratedSum,
        Measure::Pv01CalibratedBucketed,
        Measure::Pv01MarketQuoteSum,
        Measure::Pv01MarketQuoteBucketed,
        Measure::CurrencyExposure,
        Measure::CurrentCash,
        Measure::ForwardFxRate,
        Measure::UnitPrice,
        Measure::ResolvedTarget,
    ];

    /// Returns the measure name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Measure::PresentValue => "PresentValue",
            Measure::Pv01CalibratedSum => "PV01CalibratedSum",
            Measure::Pv01CalibratedBucketed => "PV01CalibratedBucketed",
            Measure::Pv01MarketQuoteSum => "PV01MarketQuoteSum",
            Measure::Pv01MarketQuoteBucketed => "PV01MarketQuoteBucketed",
            Measure::CurrencyExposure => "CurrencyExposure",
            Measure::CurrentCash => "CurrentCash",
            Measure::ForwardFxRate => "ForwardFxRate",
            Measure::UnitPrice => "UnitPrice",
            Measure::ResolvedTarget => "ResolvedTarget",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Measure {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measure::ALL
            .into_iter()
            .find(|measure| measure.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CalcError::invalid_config(format!("Unknown measure: {s}")))
    }
}
