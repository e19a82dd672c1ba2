//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pay rules
//! from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::PayRules;

/// Name of the rules file inside a configuration directory.
pub const PAY_RULES_FILE: &str = "pay_rules.yaml";

/// Loads and provides access to pay rules.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// └── pay_rules.yaml   # Night window, overtime threshold, premiums
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_pay_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// println!("Night window opens at {}:00", loader.rules().night_start_hour);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: PayRules,
}

impl ConfigLoader {
    /// Loads pay rules from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `pay_rules.yaml` is missing (`ConfigNotFound`)
    /// - the file contains invalid YAML or missing fields (`ConfigParseError`)
    /// - a value is outside what the engine supports (`InvalidPayRules`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rules_path = path.as_ref().join(PAY_RULES_FILE);
        let rules = Self::load_yaml::<PayRules>(&rules_path)?;
        Self::from_rules(rules)
    }

    /// Wraps already-constructed rules after validating them.
    pub fn from_rules(rules: PayRules) -> EngineResult<Self> {
        validate_rules(&rules)?;
        Ok(Self { rules })
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

    /// Returns the loaded pay rules.
    pub fn rules(&self) -> &PayRules {
        &self.rules
    }

    /// Consumes the loader, returning the pay rules.
    pub fn into_rules(self) -> PayRules {
        self.rules
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidPayRules {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Checks that rules describe a night window wrapping midnight and
/// non-negative premiums.
fn validate_rules(rules: &PayRules) -> EngineResult<()> {
    if rules.night_start_hour > 23 {
        return Err(invalid("night_start_hour", "must be between 0 and 23"));
    }
    if rules.night_end_hour > 23 {
        return Err(invalid("night_end_hour", "must be between 0 and 23"));
    }
    if rules.night_end_hour >= rules.night_start_hour {
        return Err(invalid(
            "night_end_hour",
            format!(
                "night window must wrap midnight ({} is not before {})",
                rules.night_end_hour, rules.night_start_hour
            ),
        ));
    }
    if rules.overtime_threshold_minutes <= 0 {
        return Err(invalid("overtime_threshold_minutes", "must be positive"));
    }
    if rules.overtime_premium < Decimal::ZERO {
        return Err(invalid("overtime_premium", "must not be negative"));
    }
    if rules.night_premium < Decimal::ZERO {
        return Err(invalid("night_premium", "must not be negative"));
    }
    if rules.transportation.per_hour < 0 {
        return Err(invalid("transportation.per_hour", "must not be negative"));
    }
    if rules.transportation.step <= 0 {
        return Err(invalid("transportation.step", "must be positive"));
    }
    Ok(())
}
