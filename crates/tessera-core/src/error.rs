//! Error types for the Tessera core value types.
//!
//! Errors raised here describe structural problems with the data itself:
//! invalid dates, inconsistent trade fields, missing reference data.

use std::fmt::Display;

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A structural invariant of a value object was violated.
    #[error("Validation failed: {reason}")]
    Validation {
        /// Description of the violated invariant.
        reason: String,
    },

    /// Unknown or unparseable currency code.
    #[error("Unknown currency: {code}")]
    UnknownCurrency {
        /// The offending code.
        code: String,
    },

    /// Reference data was requested but not available.
    #[error("Reference data not found: {id}")]
    ReferenceDataNotFound {
        /// Identifier of the missing reference data.
        id: String,
    },

    /// Curve construction failed.
    #[error("Curve construction failed: {reason}")]
    CurveConstruction {
        /// Description of the failure.
        reason: String,
    },

    /// Mathematical error (division by zero, non-finite result, etc.).
    #[error("Mathematical error: {reason}")]
    Math {
        /// Description of the error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a reference data not found error.
    #[must_use]
    pub fn reference_data_not_found(id: impl Display) -> Self {
        Self::ReferenceDataNotFound { id: id.to_string() }
    }

    /// Creates a curve construction error.
    #[must_use]
    pub fn curve_construction(reason: impl Into<String>) -> Self {
        Self::CurveConstruction {
            reason: reason.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math(reason: impl Into<String>) -> Self {
        Self::Math {
            reason: reason.into(),
        }
    }
}

/// Checks that `first` is on or before `second`.
///
/// The message names both fields so that a failed resolution can be traced
/// back to the offending trade attribute.
pub fn ensure_in_order_or_equal<T>(
    first: T,
    second: T,
    first_name: &str,
    second_name: &str,
) -> CoreResult<()>
where
    T: PartialOrd + Display,
{
    if first <= second {
        Ok(())
    } else {
        Err(CoreError::validation(format!(
            "Invalid order: Expected '{first_name}' <= '{second_name}', but found {first} > {second}"
        )))
    }
}
