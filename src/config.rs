//! Application Configuration
//!
//! Supabase connection settings, read from `client-context.toml` in the
//! platform config directory and overridable through environment variables.

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_CLIENTS_TABLE, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Environment variable overriding `supabase.url`
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
/// Environment variable overriding `supabase.api_key`
pub const ENV_SUPABASE_KEY: &str = "SUPABASE_KEY";
/// Environment variable overriding `supabase.table`
pub const ENV_SUPABASE_TABLE: &str = "SUPABASE_TABLE";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Remote store configuration
    #[serde(default)]
    pub supabase: SupabaseConfig,
}

/// Supabase (PostgREST) connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SupabaseConfig {
    /// Project URL (e.g., "https://abcd.supabase.co")
    pub url: String,
    /// API key sent as `apikey` and bearer token
    pub api_key: String,
    /// Table holding client rows
    pub table: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Rows requested per page
    pub page_size: usize,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            table: DEFAULT_CLIENTS_TABLE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl std::fmt::Display for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/rest/v1/{}", self.url, self.table)
    }
}

/// Get or create the configuration file path
fn get_config_path() -> Result<PathBuf> {
    let path = get_or_create_config_dir()?.join(CONFIG_FILE_NAME);
    if !path.exists() {
        std::fs::write(&path, "")?;
    }
    Ok(path)
}

impl AppConfig {
    /// Load from the default location and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file; an empty file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(path)?;

        if value.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
            e
        })?;
        Ok(config)
    }

    /// Save to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let value = toml::to_string_pretty(self)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    /// Override file values with non-empty values from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_SUPABASE_URL) {
            self.supabase.url = url;
        }
        if let Some(key) = lookup(ENV_SUPABASE_KEY) {
            self.supabase.api_key = key;
        }
        if let Some(table) = lookup(ENV_SUPABASE_TABLE) {
            self.supabase.table = table;
        }
    }

    /// Reject configurations that cannot reach a store
    pub fn validate(&self) -> Result<()> {
        let s = &self.supabase;
        if s.url.trim().is_empty() {
            return Err(Error::Config {
                message: format!("supabase.url is not set (or export {ENV_SUPABASE_URL})"),
            });
        }
        if s.api_key.trim().is_empty() {
            return Err(Error::Config {
                message: format!("supabase.api_key is not set (or export {ENV_SUPABASE_KEY})"),
            });
        }
        if s.table.trim().is_empty() {
            return Err(Error::Config {
                message: "supabase.table must not be empty".to_string(),
            });
        }
        if s.page_size == 0 {
            return Err(Error::Config {
                message: "supabase.page_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
