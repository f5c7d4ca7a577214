//! Values indexed by scenario.

use serde::{Deserialize, Serialize};

use tessera_core::{Currency, CurrencyAmount, MultiCurrencyAmount};

/// One value per scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioArray<T> {
    values: Vec<T>,
}

impl<T> ScenarioArray<T> {
    /// Creates an array from per-scenario values.
    pub fn of(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scenarios.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.values.len()
    }

    /// Value of a scenario.
    #[must_use]
    pub fn get(&self, scenario: usize) -> Option<&T> {
        self.values.get(scenario)
    }

    /// Iterates the values in scenario order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Maps every value.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> ScenarioArray<U> {
        ScenarioArray {
            values: self.values.iter().map(f).collect(),
        }
    }
}

impl<T> FromIterator<T> for ScenarioArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of(iter)
    }
}

/// Amounts of one currency, one per scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyScenarioArray {
    currency: Currency,
    values: Vec<f64>,
}

impl CurrencyScenarioArray {
    /// Creates an array of amounts in `currency`.
    pub fn of(currency: Currency, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            currency,
            values: values.into_iter().collect(),
        }
    }

    /// Collects per-scenario currency amounts.
    ///
    /// Returns `None` if the amounts are not all in `currency`.
    pub fn from_amounts(
        currency: Currency,
        amounts: impl IntoIterator<Item = CurrencyAmount>,
    ) -> Option<Self> {
        let values = amounts
            .into_iter()
            .map(|amount| (amount.currency == currency).then_some(amount.amount))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { currency, values })
    }

    /// Currency of the amounts.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Number of scenarios.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.values.len()
    }

    /// Amount for a scenario.
    #[must_use]
    pub fn get(&self, scenario: usize) -> Option<CurrencyAmount> {
        self.values
            .get(scenario)
            .map(|value| CurrencyAmount::of(self.currency, *value))
    }

    /// Raw values in scenario order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Multi-currency amounts, one per scenario.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiCurrencyScenarioArray {
    amounts: Vec<MultiCurrencyAmount>,
}

impl MultiCurrencyScenarioArray {
    /// Creates an array from per-scenario amounts.
    pub fn of(amounts: impl IntoIterator<Item = MultiCurrencyAmount>) -> Self {
        Self {
            amounts: amounts.into_iter().collect(),
        }
    }

    /// Number of scenarios.
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.amounts.len()
    }

    /// Amount for a scenario.
    #[must_use]
    pub fn get(&self, scenario: usize) -> Option<&MultiCurrencyAmount> {
        self.amounts.get(scenario)
    }

    /// Per-scenario values for one currency, zero where absent.
    #[must_use]
    pub fn values_for(&self, currency: Currency) -> CurrencyScenarioArray {
        CurrencyScenarioArray::of(currency, self.amounts.iter().map(|a| a.amount(currency)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_amounts_requires_single_currency() {
        let usd = [
            CurrencyAmount::of(Currency::USD, 1.0),
            CurrencyAmount::of(Currency::USD, 2.0),
        ];
        let array = CurrencyScenarioArray::from_amounts(Currency::USD, usd).unwrap();
        assert_eq!(array.values(), &[1.0, 2.0]);
        assert_eq!(array.get(1), Some(CurrencyAmount::of(Currency::USD, 2.0)));
        assert_eq!(array.get(2), None);

        let mixed = [
            CurrencyAmount::of(Currency::USD, 1.0),
            CurrencyAmount::of(Currency::EUR, 2.0),
        ];
        assert!(CurrencyScenarioArray::from_amounts(Currency::USD, mixed).is_none());
    }

    #[test]
    fn test_multi_currency_values_for() {
        let array = MultiCurrencyScenarioArray::of([
            MultiCurrencyAmount::of([CurrencyAmount::of(Currency::USD, 5.0)]),
            MultiCurrencyAmount::of([CurrencyAmount::of(Currency::EUR, 3.0)]),
        ]);
        assert_eq!(array.values_for(Currency::USD).values(), &[5.0, 0.0]);
        assert_eq!(array.scenario_count(), 2);
    }

    #[test]
    fn test_scenario_array_map() {
        let array: ScenarioArray<i32> = (1..=3).collect();
        assert_eq!(array.map(|v| v * 2).iter().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
    }
}
