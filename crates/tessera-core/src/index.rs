//! Rate and FX indices.
//!
//! An index knows how its fixings translate into accrual periods (Ibor) or
//! how a fixing date relates to a maturity date (FX).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendars::{BusinessDayConvention, HolidayCalendarId};
use crate::daycounts::DayCountConvention;
use crate::error::{CoreError, CoreResult};
use crate::reference_data::ReferenceData;
use crate::types::{Currency, CurrencyPair, Date};

/// Interbank offered rate indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IborIndex {
    /// EURIBOR 3 month.
    #[serde(rename = "EUR-EURIBOR-3M")]
    EurEuribor3M,
    /// EURIBOR 6 month.
    #[serde(rename = "EUR-EURIBOR-6M")]
    EurEuribor6M,
    /// USD LIBOR 3 month.
    #[serde(rename = "USD-LIBOR-3M")]
    UsdLibor3M,
    /// GBP LIBOR 3 month.
    #[serde(rename = "GBP-LIBOR-3M")]
    GbpLibor3M,
}

impl IborIndex {
    /// All supported indices.
    pub const ALL: [IborIndex; 4] = [
        IborIndex::EurEuribor3M,
        IborIndex::EurEuribor6M,
        IborIndex::UsdLibor3M,
        IborIndex::GbpLibor3M,
    ];

    /// Returns the index name, e.g. `USD-LIBOR-3M`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            IborIndex::EurEuribor3M => "EUR-EURIBOR-3M",
            IborIndex::EurEuribor6M => "EUR-EURIBOR-6M",
            IborIndex::UsdLibor3M => "USD-LIBOR-3M",
            IborIndex::GbpLibor3M => "GBP-LIBOR-3M",
        }
    }

    /// Returns the currency of the index.
    #[must_use]
    pub fn currency(&self) -> Currency {
        match self {
            IborIndex::EurEuribor3M | IborIndex::EurEuribor6M => Currency::EUR,
            IborIndex::UsdLibor3M => Currency::USD,
            IborIndex::GbpLibor3M => Currency::GBP,
        }
    }

    /// Returns the tenor in months.
    #[must_use]
    pub fn tenor_months(&self) -> i32 {
        match self {
            IborIndex::EurEuribor6M => 6,
            _ => 3,
        }
    }

    /// Returns the number of business days between fixing and effective date.
    #[must_use]
    pub fn spot_lag(&self) -> i32 {
        match self {
            IborIndex::GbpLibor3M => 0,
            _ => 2,
        }
    }

    /// Returns the day count used to accrue the index.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        match self {
            IborIndex::GbpLibor3M => DayCountConvention::Act365Fixed,
            _ => DayCountConvention::Act360,
        }
    }

    /// Returns the calendar used for fixing and accrual dates.
    #[must_use]
    pub fn fixing_calendar(&self) -> HolidayCalendarId {
        HolidayCalendarId::sat_sun()
    }

    /// Returns the effective date of a fixing.
    ///
    /// # Errors
    ///
    /// Fails if the fixing calendar is not in the reference data.
    pub fn effective_date(&self, fixing_date: Date, ref_data: &ReferenceData) -> CoreResult<Date> {
        let calendar = ref_data.calendar(&self.fixing_calendar())?;
        Ok(calendar.add_business_days(fixing_date, self.spot_lag()))
    }

    /// Returns the maturity date for an effective date.
    ///
    /// # Errors
    ///
    /// Fails if the fixing calendar is not in the reference data.
    pub fn maturity_date(&self, effective_date: Date, ref_data: &ReferenceData) -> CoreResult<Date> {
        let calendar = ref_data.calendar(&self.fixing_calendar())?;
        let unadjusted = effective_date.add_months(self.tenor_months())?;
        Ok(calendar.adjust(unadjusted, BusinessDayConvention::ModifiedFollowing))
    }
}

impl fmt::Display for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for IborIndex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        IborIndex::ALL
            .into_iter()
            .find(|index| index.name() == upper)
            .ok_or_else(|| CoreError::validation(format!("Unknown Ibor index: {s}")))
    }
}

/// An FX index, fixing the rate on a currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FxIndex {
    /// Currency pair the index is quoted on.
    pub pair: CurrencyPair,
    /// Calendar on which the index fixes.
    pub fixing_calendar: HolidayCalendarId,
    /// Business days between fixing date and maturity date.
    pub maturity_days: i32,
}

impl FxIndex {
    /// Creates an FX index.
    pub fn of(
        pair: CurrencyPair,
        fixing_calendar: impl Into<HolidayCalendarId>,
        maturity_days: i32,
    ) -> Self {
        Self {
            pair,
            fixing_calendar: fixing_calendar.into(),
            maturity_days,
        }
    }

    /// Returns the index name, e.g. `USD/INR`.
    #[must_use]
    pub fn name(&self) -> String {
        self.pair.to_string()
    }

    /// Returns the fixing date corresponding to a maturity date.
    ///
    /// # Errors
    ///
    /// Fails if the fixing calendar is not in the reference data.
    pub fn fixing_date_from_maturity(
        &self,
        maturity_date: Date,
        ref_data: &ReferenceData,
    ) -> CoreResult<Date> {
        let calendar = ref_data.calendar(&self.fixing_calendar)?;
        Ok(calendar.add_business_days(maturity_date, -self.maturity_days))
    }
}

impl fmt::Display for FxIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pair)
    }
}
