//! Configuration loading and management for the shift pay engine.
//!
//! This module provides the [`PayRules`] that drive premium calculation and
//! a loader that reads them from a YAML file. The statutory defaults are
//! available through [`PayRules::default`] without touching the filesystem.
//!
//! # Example
//!
//! ```no_run
//! use shift_pay_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/standard").unwrap();
//! println!("Overtime after {} minutes", loader.rules().overtime_threshold_minutes);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, PAY_RULES_FILE};
pub use types::{
    DEFAULT_NIGHT_END_HOUR, DEFAULT_NIGHT_PREMIUM, DEFAULT_NIGHT_START_HOUR,
    DEFAULT_OVERTIME_PREMIUM, DEFAULT_OVERTIME_THRESHOLD_MINUTES, PayRules, TransportationRules,
};
