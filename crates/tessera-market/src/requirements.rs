//! Declared market data requirements of a calculation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use tessera_core::Currency;

use crate::ids::MarketDataId;
use crate::scenario::ScenarioMarketData;

/// Whether a market data item must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Presence {
    /// Calculations may proceed without it.
    Optional,
    /// Calculations need it.
    Required,
}

/// The market data a target needs before it can be priced, together with
/// the currencies in play.
///
/// Requirements are computed from trade structure and configuration alone,
/// never from market data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketDataRequirements {
    ids: BTreeMap<MarketDataId, Presence>,
    currencies: BTreeSet<Currency>,
}

impl MarketDataRequirements {
    /// Requirements with nothing in them.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts a builder.
    #[must_use]
    pub fn builder() -> MarketDataRequirementsBuilder {
        MarketDataRequirementsBuilder::default()
    }

    /// Every identifier with its presence flag.
    pub fn ids(&self) -> impl Iterator<Item = (&MarketDataId, Presence)> {
        self.ids.iter().map(|(id, presence)| (id, *presence))
    }

    /// Identifiers that must be present.
    pub fn required_ids(&self) -> impl Iterator<Item = &MarketDataId> {
        self.ids
            .iter()
            .filter(|(_, presence)| **presence == Presence::Required)
            .map(|(id, _)| id)
    }

    /// Identifiers that may be absent.
    pub fn optional_ids(&self) -> impl Iterator<Item = &MarketDataId> {
        self.ids
            .iter()
            .filter(|(_, presence)| **presence == Presence::Optional)
            .map(|(id, _)| id)
    }

    /// Returns the presence flag, if the identifier is requested.
    #[must_use]
    pub fn presence(&self, id: &MarketDataId) -> Option<Presence> {
        self.ids.get(id).copied()
    }

    /// Currencies in scope.
    #[must_use]
    pub fn currencies(&self) -> &BTreeSet<Currency> {
        &self.currencies
    }

    /// Returns true if nothing is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.currencies.is_empty()
    }

    /// Union of two requirement sets; `Required` wins over `Optional`.
    #[must_use]
    pub fn combined_with(&self, other: &MarketDataRequirements) -> Self {
        let mut combined = self.clone();
        for (id, presence) in &other.ids {
            combined
                .ids
                .entry(id.clone())
                .and_modify(|existing| *existing = (*existing).max(*presence))
                .or_insert(*presence);
        }
        combined.currencies.extend(other.currencies.iter().copied());
        combined
    }

    /// Combines any number of requirement sets.
    pub fn combine<'a>(all: impl IntoIterator<Item = &'a MarketDataRequirements>) -> Self {
        all.into_iter()
            .fold(Self::empty(), |acc, reqs| acc.combined_with(reqs))
    }

    /// Required identifiers absent from the market data.
    ///
    /// An FX rate stored on the inverse pair counts as present.
    pub fn missing_from(&self, market_data: &dyn ScenarioMarketData) -> Vec<MarketDataId> {
        self.required_ids()
            .filter(|id| match id {
                MarketDataId::FxRate(pair) => market_data.fx_rate(*pair, 0).is_err(),
                _ => !market_data.contains(id),
            })
            .cloned()
            .collect()
    }
}

/// Builder for [`MarketDataRequirements`].
#[derive(Debug, Clone, Default)]
pub struct MarketDataRequirementsBuilder {
    requirements: MarketDataRequirements,
}

impl MarketDataRequirementsBuilder {
    /// Adds identifiers that must be present.
    #[must_use]
    pub fn add_required<I: Into<MarketDataId>>(mut self, ids: impl IntoIterator<Item = I>) -> Self {
        for id in ids {
            self.requirements.ids.insert(id.into(), Presence::Required);
        }
        self
    }

    /// Adds identifiers that may be absent; does not downgrade required ones.
    #[must_use]
    pub fn add_optional<I: Into<MarketDataId>>(mut self, ids: impl IntoIterator<Item = I>) -> Self {
        for id in ids {
            self.requirements
                .ids
                .entry(id.into())
                .or_insert(Presence::Optional);
        }
        self
    }

    /// Adds currencies in scope.
    #[must_use]
    pub fn add_currencies(mut self, currencies: impl IntoIterator<Item = Currency>) -> Self {
        self.requirements.currencies.extend(currencies);
        self
    }

    /// Builds the requirements.
    #[must_use]
    pub fn build(self) -> MarketDataRequirements {
        self.requirements
    }
}
