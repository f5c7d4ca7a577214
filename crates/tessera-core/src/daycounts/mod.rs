//! Day count conventions.
//!
//! - [`Act360`]: Actual/360 - Money market convention, EUR and USD Ibor indices
//! - [`Act365Fixed`]: Actual/365 Fixed - GBP Ibor, curve time axis
//!
//! ```rust
//! use tessera_core::daycounts::{Act360, DayCount};
//! use tessera_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//! assert_eq!(Act360.year_fraction(start, end), 0.25);
//! ```

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365Fixed;

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention (e.g., "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Returns the number of days between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Serializable selector over the supported day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360.
    #[serde(rename = "ACT/360")]
    Act360,
    /// Actual/365 Fixed.
    #[serde(rename = "ACT/365F")]
    Act365Fixed,
}

impl DayCountConvention {
    /// Returns the implementation for this convention.
    #[must_use]
    pub fn to_day_count(self) -> &'static dyn DayCount {
        match self {
            DayCountConvention::Act360 => &Act360,
            DayCountConvention::Act365Fixed => &Act365Fixed,
        }
    }

    /// Calculates the year fraction between two dates.
    #[must_use]
    pub fn year_fraction(self, start: Date, end: Date) -> f64 {
        self.to_day_count().year_fraction(start, end)
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_day_count().name())
    }
}
