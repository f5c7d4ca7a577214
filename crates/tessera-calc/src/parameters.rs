//! Calculation parameters: configuration objects looked up by type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{CalcError, CalcResult};

/// A value that can be held in [`CalculationParameters`].
///
/// At most one parameter of each type is held.
pub trait CalculationParameter: Any + Send + Sync {
    /// Name reported when the parameter is missing.
    const NAME: &'static str;
}

/// The parameters controlling a calculation, such as market data lookups.
///
/// Parameters are supplied by the caller, not by the target, so the same
/// target can be priced under different configurations. Cloning is cheap.
#[derive(Clone, Default)]
pub struct CalculationParameters {
    parameters: HashMap<TypeId, (&'static str, Arc<dyn Any + Send + Sync>)>,
}

impl CalculationParameters {
    /// Parameters with nothing in them.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a copy holding `parameter`, replacing one of the same type.
    #[must_use]
    pub fn with<P: CalculationParameter>(mut self, parameter: P) -> Self {
        self.parameters
            .insert(TypeId::of::<P>(), (P::NAME, Arc::new(parameter)));
        self
    }

    /// Returns the parameter of type `P`.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::NotConfigured` if no such parameter is held.
    pub fn parameter<P: CalculationParameter>(&self) -> CalcResult<&P> {
        self.find::<P>()
            .ok_or(CalcError::NotConfigured { parameter: P::NAME })
    }

    /// Returns the parameter of type `P`, if held.
    #[must_use]
    pub fn find<P: CalculationParameter>(&self) -> Option<&P> {
        self.parameters
            .get(&TypeId::of::<P>())
            .and_then(|(_, value)| value.downcast_ref::<P>())
    }

    /// Combines two parameter sets; parameters in `self` take priority.
    #[must_use]
    pub fn combined_with(&self, other: &CalculationParameters) -> Self {
        let mut combined = other.clone();
        for (type_id, entry) in &self.parameters {
            combined.parameters.insert(*type_id, entry.clone());
        }
        combined
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl fmt::Debug for CalculationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.parameters.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("CalculationParameters")
            .field("parameters", &names)
            .finish()
    }
}
