//! Reference data: holiday calendars available during resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::calendars::{Calendar, HolidayCalendarId, NoHolidays, WeekendCalendar};
use crate::error::{CoreError, CoreResult};

/// Immutable store of reference data keyed by identifier.
///
/// Cloning is cheap: calendars are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct ReferenceData {
    calendars: HashMap<HolidayCalendarId, Arc<dyn Calendar>>,
}

impl ReferenceData {
    /// Creates empty reference data.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reference data holding the built-in calendars `NO_HOLIDAYS` and `SAT_SUN`.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_calendar(HolidayCalendarId::no_holidays(), NoHolidays)
            .with_calendar(HolidayCalendarId::sat_sun(), WeekendCalendar)
    }

    /// Returns a copy with an additional calendar, replacing any existing one.
    #[must_use]
    pub fn with_calendar(
        mut self,
        id: HolidayCalendarId,
        calendar: impl Calendar + 'static,
    ) -> Self {
        self.calendars.insert(id, Arc::new(calendar));
        self
    }

    /// Looks up a calendar.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ReferenceDataNotFound` if the id is unknown.
    pub fn calendar(&self, id: &HolidayCalendarId) -> CoreResult<&dyn Calendar> {
        self.calendars
            .get(id)
            .map(|calendar| calendar.as_ref())
            .ok_or_else(|| CoreError::reference_data_not_found(id))
    }

    /// Returns true if the calendar is present.
    #[must_use]
    pub fn contains_calendar(&self, id: &HolidayCalendarId) -> bool {
        self.calendars.contains_key(id)
    }
}

impl fmt::Debug for ReferenceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.calendars.keys().map(HolidayCalendarId::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("ReferenceData").field("calendars", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::HolidaySetCalendar;
    use crate::types::Date;

    #[test]
    fn test_standard_calendars() {
        let ref_data = ReferenceData::standard();
        assert!(ref_data.contains_calendar(&HolidayCalendarId::no_holidays()));
        let sat_sun = ref_data.calendar(&HolidayCalendarId::sat_sun()).unwrap();
        assert!(!sat_sun.is_business_day(Date::from_ymd(2025, 1, 4).unwrap()));
    }

    #[test]
    fn test_missing_calendar() {
        let err = ReferenceData::standard()
            .calendar(&HolidayCalendarId::new("USNY"))
            .err()
            .unwrap();
        assert_eq!(err, CoreError::reference_data_not_found("USNY"));
    }

    #[test]
    fn test_custom_calendar() {
        let christmas = Date::from_ymd(2025, 12, 25).unwrap();
        let ref_data = ReferenceData::standard().with_calendar(
            HolidayCalendarId::new("GBLO"),
            HolidaySetCalendar::new("London", [christmas]),
        );
        let cal = ref_data.calendar(&HolidayCalendarId::new("gblo")).unwrap();
        assert_eq!(cal.name(), "London");
        assert!(cal.is_holiday(christmas));
        assert!(format!("{ref_data:?}").contains("GBLO"));
    }
}
