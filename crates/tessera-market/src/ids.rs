//! Market data identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use tessera_core::CurrencyPair;

/// Name of a curve, e.g. `USD-Disc`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveId(String);

impl CurveId {
    /// Creates a curve id.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurveId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Name of a volatility surface or curve.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolatilitiesId(String);

impl VolatilitiesId {
    /// Creates a volatilities id.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VolatilitiesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VolatilitiesId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Key of a single item of market data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketDataId {
    /// A discount or forward curve.
    Curve(CurveId),
    /// The spot FX rate on a currency pair.
    FxRate(CurrencyPair),
    /// Volatilities used by option pricers.
    Volatilities(VolatilitiesId),
}

impl fmt::Display for MarketDataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketDataId::Curve(id) => write!(f, "Curve:{id}"),
            MarketDataId::FxRate(pair) => write!(f, "FxRate:{pair}"),
            MarketDataId::Volatilities(id) => write!(f, "Volatilities:{id}"),
        }
    }
}

impl From<CurveId> for MarketDataId {
    fn from(id: CurveId) -> Self {
        MarketDataId::Curve(id)
    }
}

impl From<CurrencyPair> for MarketDataId {
    fn from(pair: CurrencyPair) -> Self {
        MarketDataId::FxRate(pair)
    }
}

impl From<VolatilitiesId> for MarketDataId {
    fn from(id: VolatilitiesId) -> Self {
        MarketDataId::Volatilities(id)
    }
}
