//! Calendar defined by an explicit set of holiday dates.

use std::collections::BTreeSet;

use super::Calendar;
use crate::types::Date;

/// A holiday calendar with Saturday/Sunday weekends plus explicit holidays.
///
/// ```
/// use tessera_core::calendars::{Calendar, HolidaySetCalendar};
/// use tessera_core::types::Date;
///
/// let cal = HolidaySetCalendar::new("USNY", [Date::from_ymd(2025, 7, 4).unwrap()]);
/// assert!(!cal.is_business_day(Date::from_ymd(2025, 7, 4).unwrap()));
/// assert!(cal.is_business_day(Date::from_ymd(2025, 7, 3).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySetCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidaySetCalendar {
    /// Creates a calendar from a list of holiday dates.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Returns the calendar name.
    #[must_use]
    pub fn calendar_name(&self) -> &str {
        &self.name
    }

    /// Returns the number of explicit holidays.
    #[must_use]
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

impl Calendar for HolidaySetCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}
