//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait and a few concrete calendars
//! - Business day adjustment conventions
//! - [`HolidayCalendarId`], the key under which calendars live in
//!   [`ReferenceData`](crate::reference_data::ReferenceData)
//! - [`BusinessDayAdjustment`], a convention bound to a calendar id

use serde::{Deserialize, Serialize};
use std::fmt;

mod conventions;
mod holiday_set;

pub use conventions::BusinessDayConvention;
pub use holiday_set::HolidaySetCalendar;

use crate::error::CoreResult;
use crate::reference_data::ReferenceData;
use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }
}

/// A calendar where every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl Calendar for NoHolidays {
    fn name(&self) -> &str {
        "No Holidays"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// A simple weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Identifier of a holiday calendar held in reference data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendarId(String);

impl HolidayCalendarId {
    /// Creates a calendar id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().to_uppercase())
    }

    /// The calendar with no holidays at all.
    #[must_use]
    pub fn no_holidays() -> Self {
        Self::new("NO_HOLIDAYS")
    }

    /// The calendar with Saturday/Sunday weekends and no other holidays.
    #[must_use]
    pub fn sat_sun() -> Self {
        Self::new("SAT_SUN")
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HolidayCalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HolidayCalendarId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A business day convention applied using a calendar from reference data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessDayAdjustment {
    /// The convention to apply.
    pub convention: BusinessDayConvention,
    /// The calendar defining business days.
    pub calendar: HolidayCalendarId,
}

impl BusinessDayAdjustment {
    /// Creates an adjustment.
    pub fn of(convention: BusinessDayConvention, calendar: impl Into<HolidayCalendarId>) -> Self {
        Self {
            convention,
            calendar: calendar.into(),
        }
    }

    /// An adjustment that never changes the date.
    #[must_use]
    pub fn none() -> Self {
        Self::of(BusinessDayConvention::Unadjusted, HolidayCalendarId::no_holidays())
    }

    /// Adjusts the date, looking the calendar up in reference data.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ReferenceDataNotFound` if the calendar is unknown.
    pub fn adjust(&self, date: Date, ref_data: &ReferenceData) -> CoreResult<Date> {
        if self.convention == BusinessDayConvention::Unadjusted {
            return Ok(date);
        }
        let calendar = ref_data.calendar(&self.calendar)?;
        Ok(calendar.adjust(date, self.convention))
    }
}
