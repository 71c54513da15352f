mod config;

pub use config::{Config, DisplayConfig, EngineConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory.
///
/// `GLOWBOARD_CONFIG_DIR` overrides the location outright. Otherwise this is
/// `~/.config/glowboard[-dev]/`, with `GLOWBOARD_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("GLOWBOARD_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("GLOWBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("glowboard-dev")
            } else {
                base_dir.join("glowboard")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
