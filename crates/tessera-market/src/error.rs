//! Error types for market data access.

use tessera_core::CoreError;
use thiserror::Error;

use crate::ids::MarketDataId;

/// A specialized Result type for market data operations.
pub type MarketDataResult<T> = Result<T, MarketDataError>;

/// Error types for market data operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Requested market data is not present.
    #[error("Market data not found: {id}")]
    NotFound {
        /// Identifier of the missing data.
        id: MarketDataId,
    },

    /// Market data is present but of another kind than requested.
    #[error("Market data {id} is not a {expected}")]
    WrongType {
        /// Identifier of the data.
        id: MarketDataId,
        /// Kind that was requested.
        expected: &'static str,
    },

    /// Per-scenario values do not match the scenario count.
    #[error("Market data {id} has {actual} scenario values, expected {expected}")]
    ScenarioCountMismatch {
        /// Identifier of the data.
        id: MarketDataId,
        /// Scenario count of the market data set.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Scenario index beyond the scenario count.
    #[error("Scenario index {index} out of range, scenario count is {count}")]
    ScenarioOutOfRange {
        /// Requested scenario.
        index: usize,
        /// Number of scenarios.
        count: usize,
    },

    /// Invalid curve or surface definition.
    #[error("Invalid market data: {reason}")]
    Invalid {
        /// Description of the problem.
        reason: String,
    },

    /// Error from a core value type.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl MarketDataError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(id: impl Into<MarketDataId>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates an invalid data error.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}
