//! Configuration handling for the TUI

use crate::session::Role;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;
const DEFAULT_CURRENCY: &str = "UGX";
const DEFAULT_ORGANISATION: &str = "SACCO Management System";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SaccoConfig {
    /// Name shown in the header and login screen
    pub organisation_name: Option<String>,
    /// Currency code prefixed to amounts
    pub currency: Option<String>,
    /// Simulated sign-in latency
    pub login_delay_ms: Option<u64>,
    /// Simulated latency for data reads and writes
    pub data_delay_ms: Option<u64>,
    /// Role preselected on the login screen
    pub default_role: Option<Role>,
}

impl SaccoConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "sacco", "sacco-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory holding the stored session
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: SaccoConfig = serde_json::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }

    /// Save configuration to the default location
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn organisation_name(&self) -> &str {
        self.organisation_name
            .as_deref()
            .unwrap_or(DEFAULT_ORGANISATION)
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms.unwrap_or(DEFAULT_LOGIN_DELAY_MS))
    }

    pub fn data_delay(&self) -> Duration {
        Duration::from_millis(self.data_delay_ms.unwrap_or(0))
    }

    pub fn default_role(&self) -> Role {
        self.default_role.unwrap_or_default()
    }
}
