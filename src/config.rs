use crate::types::{Author, Category, CollectorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Global run settings from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_check_interval")]
    pub check_interval_minutes: u32,
    #[serde(default = "default_max_items")]
    pub max_items_per_author: usize,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_check_interval() -> u32 {
    60
}

fn default_max_items() -> usize {
    10
}

fn default_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_interval_minutes: default_check_interval(),
            max_items_per_author: default_max_items(),
            request_timeout_seconds: default_timeout(),
        }
    }
}

impl Settings {
    fn validate(&self) -> Result<()> {
        if self.check_interval_minutes == 0 {
            return Err(CollectorError::Config(
                "check_interval_minutes must be greater than zero".to_string(),
            ));
        }
        if self.max_items_per_author == 0 {
            return Err(CollectorError::Config(
                "max_items_per_author must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(CollectorError::Config(
                "request_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// The author roster plus run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub authors: Vec<Author>,
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Loads and validates the roster. A missing file, unparsable JSON, or an
    /// empty roster is fatal; an individually malformed author record is
    /// skipped with a warning so one bad entry cannot take down the run.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CollectorError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&raw).map_err(|e| {
            CollectorError::Config(format!("invalid config {}: {e}", path.display()))
        })?;

        config.settings.validate()?;

        config.authors.retain(|author| match author.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(author = %author.name, error = %e, "skipping invalid author entry");
                false
            }
        });

        if config.authors.is_empty() {
            return Err(CollectorError::Config(
                "config contains no valid authors".to_string(),
            ));
        }

        Ok(config)
    }

    /// Enabled authors in file order. The orchestrator and the snapshot
    /// readers both rely on this order.
    pub fn enabled_authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter().filter(|author| author.enabled)
    }

    pub fn authors_by_category(&self, category: Category) -> impl Iterator<Item = &Author> {
        self.enabled_authors()
            .filter(move |author| author.category == category)
    }
}
