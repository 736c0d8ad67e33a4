use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Site configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Directory holding `*.cook` recipe files
    #[serde(default = "default_recipes_dir")]
    pub recipes_dir: PathBuf,
    /// Open Graph tester settings
    #[serde(default)]
    pub og: OgConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            recipes_dir: default_recipes_dir(),
            og: OgConfig::default(),
        }
    }
}

/// Settings for fetching pages in the Open Graph tester
#[derive(Debug, Deserialize, Clone)]
pub struct OgConfig {
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User agent sent with page requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl OgConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// Default value functions
fn default_recipes_dir() -> PathBuf {
    PathBuf::from("src/content/recipes")
}

fn default_timeout_ms() -> u64 {
    8000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with COOKSHELF__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: COOKSHELF__OG__TIMEOUT_MS
pub fn load_config() -> Result<SiteConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: COOKSHELF__OG__USER_AGENT
        .add_source(
            Environment::with_prefix("COOKSHELF")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
