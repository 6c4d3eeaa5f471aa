use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONTRACT_PRICE_URL, DEFAULT_CONFIG_FILE, DEFAULT_INPUT_FILE, DEFAULT_INTERMEDIATE_FILE,
    DEFAULT_REPORT_FILE, FORGE_REGION_ID, LOOKBACK_DAYS, REQUEST_DELAY_MS, TYPEID_LOOKUP_URL,
};
use crate::error::{AppraiserError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub files: FilesConfig,
    pub lookup: LookupConfig,
    pub market: MarketConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub input: PathBuf,
    pub intermediate: PathBuf,
    pub report: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            intermediate: PathBuf::from(DEFAULT_INTERMEDIATE_FILE),
            report: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub base_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: TYPEID_LOOKUP_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub base_url: String,
    pub region_id: u64,
    pub days: u32,
    pub delay_ms: u64,
}

impl MarketConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: CONTRACT_PRICE_URL.to_string(),
            region_id: FORGE_REGION_ID,
            days: LOOKBACK_DAYS,
            delay_ms: REQUEST_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Wait for Enter after the report is written.
    pub pause_on_exit: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { pause_on_exit: true }
    }
}

impl Config {
    /// Load `appraiser.toml` from the working directory, falling back to the
    /// built-in defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load an explicitly requested config file. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            AppraiserError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
