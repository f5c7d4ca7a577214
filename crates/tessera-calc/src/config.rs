//! Calculation configuration.
//!
//! Names the curves and volatilities used for each currency and index, and
//! the measures requested by default. Loaded from TOML or JSON:
//!
//! ```toml
//! measures = ["PresentValue", "CurrencyExposure"]
//!
//! [rates.discount_curves]
//! USD = "USD-Disc"
//! EUR = "EUR-Disc"
//!
//! [rates.forward_curves]
//! "EUR-EURIBOR-3M" = "EUR-3M"
//!
//! [ibor_future_option.volatilities]
//! "EUR-EURIBOR-3M" = "EUR-Vols"
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tessera_core::index::IborIndex;
use tessera_core::Currency;
use tessera_market::ids::{CurveId, VolatilitiesId};

use crate::error::{CalcError, CalcResult};
use crate::lookup::{DefaultIborFutureOptionMarketDataLookup, DefaultRatesMarketDataLookup};
use crate::measure::Measure;
use crate::parameters::CalculationParameters;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Returns every problem found, empty if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error listing every problem.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if any problem is found.
    fn validate_or_error(&self) -> CalcResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
        Err(CalcError::invalid_config(messages.join("; ")))
    }
}

/// Curves used for discounting and forwarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatesConfig {
    /// Discount curve by currency code.
    #[serde(default)]
    pub discount_curves: BTreeMap<String, String>,
    /// Forward curve by index name.
    #[serde(default)]
    pub forward_curves: BTreeMap<String, String>,
}

/// Volatilities used for Ibor future options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IborFutureOptionConfig {
    /// Volatilities by index name.
    #[serde(default)]
    pub volatilities: BTreeMap<String, String>,
}

/// Configuration of a calculation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// Measures requested when the caller names none.
    #[serde(default)]
    pub measures: Vec<String>,
    /// Rates curves.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Option volatilities, if options are calculated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ibor_future_option: Option<IborFutureOptionConfig>,
}

impl CalculationConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if the document cannot be parsed.
    pub fn from_toml_str(content: &str) -> CalcResult<Self> {
        toml::from_str(content).map_err(|e| CalcError::invalid_config(e.to_string()))
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if the document cannot be parsed.
    pub fn from_json_str(content: &str) -> CalcResult<Self> {
        serde_json::from_str(content).map_err(|e| CalcError::invalid_config(e.to_string()))
    }

    /// Loads a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if the file cannot be read or
    /// parsed.
    pub fn from_file(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CalcError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "loading calculation config");
        Self::from_toml_str(&content)
    }

    /// The default measures.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if a measure name is unknown.
    pub fn requested_measures(&self) -> CalcResult<BTreeSet<Measure>> {
        self.measures.iter().map(|name| name.parse()).collect()
    }

    /// The rates lookup described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if the configuration is invalid.
    pub fn rates_lookup(&self) -> CalcResult<DefaultRatesMarketDataLookup> {
        self.validate_or_error()?;
        let discount_curves = self
            .rates
            .discount_curves
            .iter()
            .map(|(ccy, curve)| Ok((ccy.parse::<Currency>()?, CurveId::new(curve.as_str()))))
            .collect::<CalcResult<Vec<_>>>()?;
        let forward_curves = self
            .rates
            .forward_curves
            .iter()
            .map(|(index, curve)| Ok((index.parse::<IborIndex>()?, CurveId::new(curve.as_str()))))
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(DefaultRatesMarketDataLookup::of(discount_curves, forward_curves))
    }

    /// The volatility lookup, if configured.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if the configuration is invalid.
    pub fn ibor_future_option_lookup(&self) -> CalcResult<Option<DefaultIborFutureOptionMarketDataLookup>> {
        self.validate_or_error()?;
        let Some(options) = &self.ibor_future_option else {
            return Ok(None);
        };
        let volatilities = options
            .volatilities
            .iter()
            .map(|(index, vols)| Ok((index.parse::<IborIndex>()?, VolatilitiesId::new(vols.as_str()))))
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(Some(DefaultIborFutureOptionMarketDataLookup::of(volatilities)))
    }

    /// Builds the calculation parameters carrying the configured lookups.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::InvalidConfig` if the configuration is invalid.
    pub fn to_parameters(&self) -> CalcResult<CalculationParameters> {
        let mut parameters = CalculationParameters::empty().with(self.rates_lookup()?.into_parameter());
        if let Some(options) = self.ibor_future_option_lookup()? {
            parameters = parameters.with(options.into_parameter());
        }
        debug!(parameters = parameters.len(), "built calculation parameters");
        Ok(parameters)
    }
}

impl Validate for CalculationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for name in &self.measures {
            if name.parse::<Measure>().is_err() {
                errors.push(ValidationError::with_rule(
                    "measures",
                    format!("Unknown measure '{name}'"),
                    "known_measure",
                ));
            }
        }

        if self.rates.discount_curves.is_empty() {
            errors.push(ValidationError::with_rule(
                "rates.discount_curves",
                "At least one discount curve must be configured",
                "discount_curve_required",
            ));
        }

        let mut discounted = BTreeSet::new();
        for (code, curve) in &self.rates.discount_curves {
            match code.parse::<Currency>() {
                Ok(currency) => {
                    discounted.insert(currency);
                }
                Err(_) => errors.push(ValidationError::with_rule(
                    "rates.discount_curves",
                    format!("Unknown currency '{code}'"),
                    "known_currency",
                )),
            }
            if curve.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("rates.discount_curves.{code}"),
                    "Curve name cannot be empty",
                ));
            }
        }

        for (name, curve) in &self.rates.forward_curves {
            match name.parse::<IborIndex>() {
                Ok(index) if !discounted.contains(&index.currency()) => {
                    errors.push(ValidationError::with_rule(
                        format!("rates.forward_curves.{name}"),
                        format!("No discount curve for index currency {}", index.currency()),
                        "index_currency_discounted",
                    ));
                }
                Ok(_) => {}
                Err(_) => errors.push(ValidationError::with_rule(
                    "rates.forward_curves",
                    format!("Unknown index '{name}'"),
                    "known_index",
                )),
            }
            if curve.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("rates.forward_curves.{name}"),
                    "Curve name cannot be empty",
                ));
            }
        }

        if let Some(options) = &self.ibor_future_option {
            for (name, vols) in &options.volatilities {
                if name.parse::<IborIndex>().is_err() {
                    errors.push(ValidationError::with_rule(
                        "ibor_future_option.volatilities",
                        format!("Unknown index '{name}'"),
                        "known_index",
                    ));
                }
                if vols.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("ibor_future_option.volatilities.{name}"),
                        "Volatilities name cannot be empty",
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{IborFutureOptionLookup, RatesLookup};

    const TOML: &str = r#"
measures = ["PresentValue", "pv01calibratedsum"]

[rates.discount_curves]
USD = "USD-Disc"
EUR = "EUR-Disc"

[rates.forward_curves]
"EUR-EURIBOR-3M" = "EUR-3M"

[ibor_future_option.volatilities]
"EUR-EURIBOR-3M" = "EUR-Vols"
"#;

    #[test]
    fn test_from_toml() {
        let config = CalculationConfig::from_toml_str(TOML).unwrap();
        assert!(config.is_valid());
        assert_eq!(
            config.requested_measures().unwrap(),
            BTreeSet::from([Measure::PresentValue, Measure::Pv01CalibratedSum])
        );
        let rates = config.rates_lookup().unwrap();
        assert_eq!(rates.discount_curves[&Currency::USD], CurveId::new("USD-Disc"));
        assert_eq!(rates.forward_curves[&IborIndex::EurEuribor3M], CurveId::new("EUR-3M"));
    }

    #[test]
    fn test_to_parameters() {
        let params = CalculationConfig::from_toml_str(TOML).unwrap().to_parameters().unwrap();
        assert_eq!(params.len(), 2);
        assert!(params.parameter::<RatesLookup>().is_ok());
        assert!(params.parameter::<IborFutureOptionLookup>().is_ok());
    }

    #[test]
    fn test_from_json_without_options() {
        let json = r#"{"rates": {"discount_curves": {"USD": "USD-Disc"}}}"#;
        let config = CalculationConfig::from_json_str(json).unwrap();
        assert!(config.ibor_future_option_lookup().unwrap().is_none());
        let params = config.to_parameters().unwrap();
        assert_eq!(params.len(), 1);
        assert!(matches!(
            params.parameter::<IborFutureOptionLookup>(),
            Err(CalcError::NotConfigured { .. })
        ));
    }

    #[test]
    fn test_validation_collects_problems() {
        let config = CalculationConfig {
            measures: vec!["Theta".to_string()],
            rates: RatesConfig {
                discount_curves: BTreeMap::from([("XXX".to_string(), " ".to_string())]),
                forward_curves: BTreeMap::from([("USD-LIBOR-3M".to_string(), "USD-3M".to_string())]),
            },
            ibor_future_option: None,
        };
        let errors = config.validate();
        let rules: Vec<_> = errors.iter().filter_map(|e| e.rule.as_deref()).collect();
        assert_eq!(errors.len(), 4);
        assert!(rules.contains(&"known_measure"));
        assert!(rules.contains(&"known_currency"));
        assert!(rules.contains(&"index_currency_discounted"));

        let err = config.to_parameters().unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfig { .. }));
        assert!(err.to_string().contains("Unknown currency 'XXX'"));
    }

    #[test]
    fn test_empty_config_invalid() {
        let config = CalculationConfig::default();
        assert!(!config.is_valid());
        assert_eq!(config.validate()[0].field, "rates.discount_curves");
    }

    #[test]
    fn test_malformed_toml() {
        let err = CalculationConfig::from_toml_str("rates = 3").unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfig { .. }));
    }
}
