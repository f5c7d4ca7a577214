//! Trade identity and the resolution contract.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use tessera_core::{CoreError, CoreResult, Date, ReferenceData};

/// Identifier of a trade, e.g. `OG-Trade~1234`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(String);

impl TradeId {
    /// Creates a trade id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TradeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Additional information attached to a trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeInfo {
    /// Identifier, if the trade has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TradeId>,
    /// Trade date, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_date: Option<Date>,
}

impl TradeInfo {
    /// Info carrying only an identifier.
    pub fn with_id(id: impl Into<TradeId>) -> Self {
        Self {
            id: Some(id.into()),
            trade_date: None,
        }
    }

    /// Returns a copy with the trade date set.
    #[must_use]
    pub fn trade_date(mut self, date: Date) -> Self {
        self.trade_date = Some(date);
        self
    }
}

/// A value that can be turned into its calculation-ready form.
///
/// Resolution applies reference data (holiday calendars, index conventions)
/// and validates the structure of the value. It is comparatively expensive
/// and is done once per calculation, never per measure.
pub trait Resolvable {
    /// The resolved form.
    type Resolved;

    /// Resolves using reference data.
    ///
    /// # Errors
    ///
    /// Fails when reference data is missing or the value is structurally
    /// invalid.
    fn resolve(&self, ref_data: &ReferenceData) -> CoreResult<Self::Resolved>;
}

/// Converts a decimal trade quantity for pricing.
pub(crate) fn decimal_to_f64(value: Decimal, name: &str) -> CoreResult<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::validation(format!("'{name}' cannot be represented: {value}")))
}
