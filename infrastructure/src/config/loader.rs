//! Configuration loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "gift-genie.toml";

/// Environment variables and the config keys they set.
const ENV_KEYS: &[(&str, &str)] = &[
    ("AI_MODEL", "provider.model"),
    ("AI_URL", "provider.url"),
    ("AI_KEY", "provider.api_key"),
    ("GIFT_REQUEST_TIMEOUT_SECS", "provider.request_timeout_secs"),
    ("PORT", "server.port"),
    ("GIFT_HOST", "server.host"),
    ("GIFT_WHERE_TO_BUY", "server.where_to_buy"),
    ("GIFT_SESSION_TTL_SECS", "server.session_ttl_secs"),
    ("GIFT_MAX_SESSIONS", "server.max_sessions"),
    ("GIFT_CONVERSATION_LOG", "server.conversation_log"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment (`AI_MODEL`, `AI_URL`, `AI_KEY`, `PORT`, `GIFT_*`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./gift-genie.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let figment = Self::files(config_path).merge(Self::env());
        Self::extract(figment)
    }

    /// Load from files and defaults only.
    pub fn load_files(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Self::extract(Self::files(config_path))
    }

    fn files(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    fn env() -> Env {
        let names: Vec<&str> = ENV_KEYS.iter().map(|(name, _)| *name).collect();
        Env::raw().only(&names).map(|name| {
            Self::env_key(name.as_str())
                .map(Into::into)
                .unwrap_or_else(|| name.into())
        })
    }

    fn extract(figment: Figment) -> Result<FileConfig, ConfigError> {
        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Config key set by an environment variable.
    pub fn env_key(name: &str) -> Option<&'static str> {
        ENV_KEYS
            .iter()
            .find(|(env, _)| env.eq_ignore_ascii_case(name))
            .map(|(_, key)| *key)
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Print the config sources in priority order (for `show-config`).
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        let set: Vec<&str> = ENV_KEYS
            .iter()
            .filter(|(name, _)| std::env::var_os(name).is_some())
            .map(|(name, _)| *name)
            .collect();
        if set.is_empty() {
            println!("  [     ] Environment");
        } else {
            println!("  [FOUND] Environment: {}", set.join(", "));
        }
        match config_path {
            Some(path) => println!("  [FOUND] Explicit: {}", path.display()),
            None => println!("  [     ] Explicit: --config <PATH>"),
        }
        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./{}", PROJECT_CONFIG_FILE),
        }
        println!("  [FOUND] Default: built-in defaults");
    }
}
