//! # Tessera Core
//!
//! Core value types shared by every layer of the Tessera calculation engine.
//!
//! - **Types**: `Date`, `Currency`, `CurrencyPair`, amounts and FX rates
//! - **Day Count Conventions**: year fractions for accrual and curve time
//! - **Business Day Calendars**: calendars, conventions and adjustments
//! - **Indices**: Ibor and FX indices
//! - **Reference Data**: the calendars available when resolving trades
//!
//! ## Example
//!
//! ```rust
//! use tessera_core::prelude::*;
//!
//! let ref_data = ReferenceData::standard();
//! let adjustment = BusinessDayAdjustment::of(BusinessDayConvention::Following, "SAT_SUN");
//! let saturday = Date::from_ymd(2025, 1, 4).unwrap();
//! assert_eq!(
//!     adjustment.adjust(saturday, &ref_data).unwrap(),
//!     Date::from_ymd(2025, 1, 6).unwrap()
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod index;
pub mod reference_data;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayAdjustment, BusinessDayConvention, Calendar, HolidayCalendarId,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::index::{FxIndex, IborIndex};
    pub use crate::reference_data::ReferenceData;
    pub use crate::types::{
        Currency, CurrencyAmount, CurrencyPair, Date, FxRate, MultiCurrencyAmount,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use reference_data::ReferenceData;
pub use types::{Currency, CurrencyAmount, CurrencyPair, Date, FxRate, MultiCurrencyAmount};
