//! Configuration loading and management for the Estimate Engine.
//!
//! This module provides functionality to load estimator configurations from
//! YAML files: new-project defaults, the default labor rate table and the
//! state sales-tax table.
//!
//! # Example
//!
//! ```no_run
//! use estimate_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Trades: {}", config.rate_table().trades().count());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AdditionalConsiderationDefaults, DefaultPercentages, EstimatorConfig, EstimatorDefaults,
    QuickQuoteDefaults, RatesConfig, SalesTaxTable,
};
