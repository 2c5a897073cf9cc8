use crate::error::{CleanupError, Result};
use crate::hosting::github::{DEFAULT_API_URL, MAX_PER_PAGE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "orphantags.toml";
/// File name looked up in the user config directory
pub const USER_CONFIG_FILE_NAME: &str = ".orphantags.toml";

/// Represents the complete configuration for orphan-tags.
///
/// Contains hosting API settings and behavior options. Repository
/// coordinates and the token are not configured here; they come from the
/// execution context.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Settings for talking to the GitHub API
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            per_page: default_per_page(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Report deletions without performing them
    #[serde(default)]
    pub dry_run: bool,

    /// Local git remote used to infer the repository when the environment
    /// does not name one
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            dry_run: false,
            remote: default_remote(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CleanupError::config(e.to_string()))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `orphantags.toml` in current directory
/// 3. `.orphantags.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or if an
///   explicit path does not exist
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            CleanupError::config(format!("Cannot read config file '{}': {}", path, e))
        })?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}
