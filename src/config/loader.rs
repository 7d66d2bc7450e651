//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading estimator
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{ProjectSettings, QuickQuoteSettings, RateTable};

use super::types::{EstimatorConfig, EstimatorDefaults, RatesConfig, SalesTaxTable};

/// Loads and provides access to estimator configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to build default project settings from them.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── estimator.yaml   # New-project defaults
/// ├── rates.yaml       # Trade → role → hourly rate
/// └── sales_tax.yaml   # State → sales tax percent
/// ```
///
/// # Example
///
/// ```no_run
/// use estimate_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let settings = loader.default_project_settings(Some("TX"));
/// println!("Sales tax in TX: {}%", settings.sales_tax);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EstimatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let defaults = Self::load_yaml::<EstimatorDefaults>(&path.join("estimator.yaml"))?;
        let rates = Self::load_yaml::<RatesConfig>(&path.join("rates.yaml"))?;
        let sales_tax = Self::load_yaml::<SalesTaxTable>(&path.join("sales_tax.yaml"))?;

        Ok(Self {
            config: EstimatorConfig::new(defaults, rates.trades, sales_tax),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying estimator configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Returns the default trade/role rate table.
    pub fn rate_table(&self) -> &RateTable {
        self.config.rates()
    }

    /// Returns the configured sales tax percent for a state, if any.
    ///
    /// State codes are matched case-insensitively.
    pub fn sales_tax_for_state(&self, state: &str) -> Option<Decimal> {
        self.config
            .sales_tax()
            .rates
            .get(&state.trim().to_ascii_uppercase())
            .copied()
    }

    /// Builds settings for a new detailed project.
    ///
    /// The sales tax is seeded from the state table; unknown states fall back
    /// to the configured default percentage.
    pub fn default_project_settings(&self, state: Option<&str>) -> ProjectSettings {
        let defaults = self.config.defaults();
        let state = state
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| defaults.project_state.clone());
        let pct = &defaults.percentages;

        let mut settings =
            ProjectSettings::new(self.rate_table().clone(), defaults.active_trades.clone());
        settings.project_type = defaults.project_type.clone();
        settings.sales_tax = self.sales_tax_for_state(&state).unwrap_or(pct.sales_tax);
        settings.project_state = state;
        settings.profit_margin = pct.profit_margin;
        settings.miscellaneous = pct.miscellaneous;
        settings.overhead = pct.overhead;
        settings.material_markup = pct.material_markup;
        settings.discount = pct.discount;
        settings.additional_considerations_type = defaults.additional_considerations.kind;
        settings.additional_considerations_value = defaults.additional_considerations.value;
        settings
    }

    /// Builds settings for a new quick quote.
    pub fn default_quick_quote_settings(&self) -> QuickQuoteSettings {
        let defaults = self.config.defaults();
        let pct = &defaults.percentages;
        QuickQuoteSettings {
            overhead: pct.overhead,
            material_markup: pct.material_markup,
            profit_margin: pct.profit_margin,
            miscellaneous: pct.miscellaneous,
            default_hourly_rate: self
                .rate_table()
                .rate("General", "Journeyman")
                .unwrap_or(defaults.quick_quote.default_hourly_rate),
        }
    }
}
