//! Measure registry and the dispatch loop.
//!
//! A [`MeasureRegistry`] maps each supported measure of one target type to
//! a calculator. [`MeasureRegistry::calculate`] runs every requested measure
//! and isolates failures: an unsupported measure, a calculator error or a
//! calculator panic affects only the result of that measure.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{trace, warn};

use tessera_core::ReferenceData;
use tessera_products::Resolvable;

use crate::error::{CalcError, CalcResult};
use crate::measure::Measure;
use crate::result::{Failure, MeasureResult, MeasureResults, MeasureValue, ResolvedTarget};

/// Calculates one measure for a resolved target against a market data view.
///
/// The calculator covers every scenario of the view in one call.
pub type MeasureCalculator<R, V> = fn(&R, &V) -> CalcResult<MeasureValue>;

/// Immutable table from measure to calculator for one target type.
pub struct MeasureRegistry<R, V> {
    calculators: HashMap<Measure, MeasureCalculator<R, V>>,
}

impl<R, V> MeasureRegistry<R, V> {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> MeasureRegistryBuilder<R, V> {
        MeasureRegistryBuilder {
            calculators: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Measures with a registered calculator.
    #[must_use]
    pub fn supported_measures(&self) -> BTreeSet<Measure> {
        self.calculators.keys().copied().collect()
    }

    /// Returns true if the measure has a calculator.
    #[must_use]
    pub fn supports(&self, measure: Measure) -> bool {
        self.calculators.contains_key(&measure)
    }

    /// Runs every requested measure.
    ///
    /// The returned map holds exactly one entry per requested measure.
    /// Measures without a calculator fail as unsupported; calculator errors
    /// and panics become failures of that measure.
    pub fn calculate(
        &self,
        target_kind: &str,
        target: &R,
        view: &V,
        measures: &BTreeSet<Measure>,
    ) -> MeasureResults {
        let mut results = HashMap::with_capacity(measures.len());
        for &measure in measures {
            let result = self.calculate_measure(target_kind, target, view, measure);
            if let Err(failure) = &result {
                warn!(
                    target_kind,
                    measure = %measure,
                    reason = ?failure.reason,
                    message = %failure.message,
                    "measure failed"
                );
            }
            results.insert(measure, result);
        }
        results
    }

    fn calculate_measure(
        &self,
        target_kind: &str,
        target: &R,
        view: &V,
        measure: Measure,
    ) -> MeasureResult {
        let Some(calculator) = self.calculators.get(&measure) else {
            return Err(Failure::unsupported(target_kind, measure));
        };
        trace!(target_kind, measure = %measure, "calculating measure");
        match catch_unwind(AssertUnwindSafe(|| calculator(target, view))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(Failure::from_error(error)),
            Err(payload) => Err(Failure::from_panic(payload.as_ref())),
        }
    }

    /// Resolves the target, builds the market data view, then runs every
    /// requested measure.
    ///
    /// The target is resolved once and the view built once, whatever the
    /// number of measures.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::Resolution` if the target cannot be resolved and
    /// propagates any error from building the view. Per-measure problems are
    /// reported in the returned map instead.
    pub fn resolve_and_calculate<T>(
        &self,
        target_kind: &str,
        target: &T,
        ref_data: &ReferenceData,
        measures: &BTreeSet<Measure>,
        view: impl FnOnce() -> CalcResult<V>,
    ) -> CalcResult<MeasureResults>
    where
        T: Resolvable<Resolved = R>,
    {
        let resolved = target
            .resolve(ref_data)
            .map_err(|source| CalcError::resolution(target_kind, source))?;
        let view = view()?;
        Ok(self.calculate(target_kind, &resolved, &view, measures))
    }
}

impl<R, V> fmt::Debug for MeasureRegistry<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureRegistry")
            .field("measures", &self.supported_measures())
            .finish()
    }
}

/// Builder for [`MeasureRegistry`].
pub struct MeasureRegistryBuilder<R, V> {
    calculators: HashMap<Measure, MeasureCalculator<R, V>>,
    duplicates: Vec<Measure>,
}

impl<R, V> MeasureRegistryBuilder<R, V> {
    /// Registers the calculator for a measure.
    #[must_use]
    pub fn register(mut self, measure: Measure, calculator: MeasureCalculator<R, V>) -> Self {
        if self.calculators.insert(measure, calculator).is_some() {
            self.duplicates.push(measure);
        }
        self
    }

    /// Registers `ResolvedTarget` as a passthrough of the resolved target.
    #[must_use]
    pub fn with_resolved_target(self) -> Self
    where
        R: Clone + Into<ResolvedTarget>,
    {
        self.register(Measure::ResolvedTarget, resolved_target::<R, V>)
    }

    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::Registry` if a measure was registered twice.
    pub fn build(self) -> CalcResult<MeasureRegistry<R, V>> {
        if !self.duplicates.is_empty() {
            let names: Vec<_> = self.duplicates.iter().map(Measure::name).collect();
            return Err(CalcError::registry(format!(
                "measure registered more than once: {}",
                names.join(", ")
            )));
        }
        Ok(MeasureRegistry {
            calculators: self.calculators,
        })
    }
}

fn resolved_target<R, V>(target: &R, _view: &V) -> CalcResult<MeasureValue>
where
    R: Clone + Into<ResolvedTarget>,
{
    Ok(MeasureValue::ResolvedTarget(Box::new(target.clone().into())))
}
