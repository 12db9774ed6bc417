mod config;

pub use config::{AudioConfig, Config, SessionDefaults, TickerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `INTERVALS_DATA_DIR` wins when set. Otherwise `~/.config/intervals[-dev]/`,
/// with the `-dev` suffix selected by `INTERVALS_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("INTERVALS_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("INTERVALS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("intervals-dev")
            } else {
                base_dir.join("intervals")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
