use anyhow::{Result, anyhow};
use log::LevelFilter;
use std::env;

use crate::logging::parse_level;
use crate::stats::WeightUnit;

pub const DEFAULT_DATABASE_URL: &str = "gymbook.db";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite path, or `:memory:`.
    pub database_url: String,
    /// Unit the front end displays weights in; records are always kg.
    pub weight_unit: WeightUnit,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            weight_unit: WeightUnit::Kg,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Config {
    /// Reads `DATABASE_URL`, `GYMBOOK_WEIGHT_UNIT` and `GYMBOOK_LOG`, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            config.database_url = url.trim().to_string();
        }
        if let Some(unit) = lookup("GYMBOOK_WEIGHT_UNIT") {
            config.weight_unit = unit
                .parse()
                .map_err(|_| anyhow!("GYMBOOK_WEIGHT_UNIT must be kg, lbs or stone, got {:?}", unit))?;
        }
        if let Some(level) = lookup("GYMBOOK_LOG") {
            config.log_level = parse_level(&level)
                .ok_or_else(|| anyhow!("GYMBOOK_LOG is not a log level: {:?}", level))?;
        }
        Ok(config)
    }
}
