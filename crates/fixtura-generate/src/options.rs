use std::path::{Path, PathBuf};

use fixtura_calendar::DateRange;
use serde::{Deserialize, Serialize};

use crate::errors::{GenerationError, Result};

/// Options shared by builders and the seeder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedOptions {
    /// Fixed RNG seed. Builders draw from OS entropy when absent.
    pub seed: Option<u64>,
    /// First Persian year used by full-date, name and year directives.
    pub year_min: i32,
    /// Last Persian year used by full-date, name and year directives.
    pub year_max: i32,
    /// Nesting limit for related instances built from foreign-key directives.
    pub max_relation_depth: usize,
    pub logging: LoggingOptions,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            seed: None,
            year_min: 1380,
            year_max: 1410,
            max_relation_depth: 3,
            logging: LoggingOptions::default(),
        }
    }
}

impl SeedOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_years(mut self, year_min: i32, year_max: i32) -> Self {
        self.year_min = year_min;
        self.year_max = year_max;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: SeedOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.year_min < 1 {
            return Err(GenerationError::InvalidArgument(format!(
                "year_min must be at least 1, got {}",
                self.year_min
            )));
        }
        if self.year_min > self.year_max {
            return Err(GenerationError::InvalidArgument(format!(
                "year_min ({}) is greater than year_max ({})",
                self.year_min, self.year_max
            )));
        }
        Ok(())
    }

    /// Calendar span covering every day of the configured years.
    pub fn year_span(&self) -> Result<DateRange> {
        Ok(DateRange::years(self.year_min, self.year_max)?)
    }
}

/// Subscriber settings applied by [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
    /// Append log lines to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
