//! cmdpal configuration.
//!
//! TOML-based configuration with validation. Every section uses serde
//! defaults so partial files work out of the box.
//!
//! ```rust,no_run
//! use cmdpal_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("debounce: {}ms", config.palette.command_debounce_ms);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BridgeConfig, CmdpalConfig, LogLevel, LoggingConfig, PaletteConfig, CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use cmdpal_common::ConfigError;

/// Load and strictly validate the config.
///
/// With `path`, that file must exist. Without it, the platform default
/// location is used and a commented default file is created when missing.
pub fn load_config(path: Option<&Path>) -> Result<CmdpalConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)?
        }
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &CmdpalConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
