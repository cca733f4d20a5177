//! Configuration loading for gift-genie
//!
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (`AI_MODEL`, `AI_URL`, `AI_KEY`, `PORT`, `GIFT_*`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./gift-genie.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileClientConfig, FileConfig, FileProviderConfig, FileServerConfig,
};
pub use loader::{ConfigError, ConfigLoader, PROJECT_CONFIG_FILE};
