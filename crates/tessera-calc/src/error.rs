//! Error types for calculations.
//!
//! A [`CalcError`] either aborts a whole calculation (resolution and
//! configuration problems) or is captured into the [`Failure`] of the one
//! measure that raised it.
//!
//! [`Failure`]: crate::result::Failure

use tessera_core::CoreError;
use tessera_market::ids::MarketDataId;
use tessera_market::MarketDataError;
use thiserror::Error;

use crate::result::FailureReason;

/// A specialized Result type for calculation operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// The main error type for calculation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// The target could not be resolved.
    #[error("Failed to resolve {target}: {source}")]
    Resolution {
        /// Description of the target.
        target: String,
        /// Underlying structural error.
        source: CoreError,
    },

    /// A calculation parameter is absent.
    #[error("Calculation parameter not configured: {parameter}")]
    NotConfigured {
        /// Name of the missing parameter.
        parameter: &'static str,
    },

    /// Configuration is present but invalid.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Market data is missing or of the wrong kind.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Numerical or model failure inside a calculator.
    #[error("Calculation failed: {reason}")]
    Calculation {
        /// Description of the failure.
        reason: String,
    },

    /// Error from a core value type.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A measure registry was built inconsistently.
    #[error("Measure registry error: {reason}")]
    Registry {
        /// Description of the problem.
        reason: String,
    },
}

impl CalcError {
    /// Creates a resolution error.
    #[must_use]
    pub fn resolution(target: impl Into<String>, source: CoreError) -> Self {
        Self::Resolution {
            target: target.into(),
            source,
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates an error for absent market data.
    #[must_use]
    pub fn missing_market_data(id: impl Into<MarketDataId>) -> Self {
        Self::MarketData(MarketDataError::not_found(id))
    }

    /// Creates a calculation error.
    #[must_use]
    pub fn calculation(reason: impl Into<String>) -> Self {
        Self::Calculation {
            reason: reason.into(),
        }
    }

    /// Creates a registry error.
    #[must_use]
    pub fn registry(reason: impl Into<String>) -> Self {
        Self::Registry {
            reason: reason.into(),
        }
    }

    /// Classification used when the error is isolated to one measure.
    #[must_use]
    pub fn failure_reason(&self) -> FailureReason {
        match self {
            CalcError::MarketData(_) => FailureReason::MissingData,
            CalcError::Calculation { .. } => FailureReason::CalculationFailed,
            CalcError::Resolution { .. }
            | CalcError::NotConfigured { .. }
            | CalcError::InvalidConfig { .. }
            | CalcError::Core(_)
            | CalcError::Registry { .. } => FailureReason::Invalid,
        }
    }
}
