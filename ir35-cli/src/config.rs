//! TOML configuration file for `ir35-calc`.
//!
//! Every key is optional; command-line flags take precedence over the file.
//!
//! ```toml
//! rates_file = "rates/uk_2025_26.csv"
//!
//! [engagement]
//! day_rate = 1500
//! days_per_year = 220
//! role = "cfo"
//!
//! [limited_company]
//! annual_expenses = 2500
//! director_salary = 12570
//!
//! [umbrella]
//! annual_margin = 1100
//!
//! [logging]
//! level = "info"
//! file = "ir35.log"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ir35_core::{LimitedCompanyAssumptions, ScenarioAssumptions, UmbrellaAssumptions};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngagementConfig {
    pub day_rate: Option<Decimal>,
    pub days_per_year: Option<u32>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// CSV of replacement band tables, relative to the working directory.
    pub rates_file: Option<PathBuf>,
    pub engagement: EngagementConfig,
    pub limited_company: LimitedCompanyAssumptions,
    pub umbrella: UmbrellaAssumptions,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn assumptions(&self) -> ScenarioAssumptions {
        ScenarioAssumptions {
            limited_company: self.limited_company.clone(),
            umbrella: self.umbrella.clone(),
        }
    }
}
