//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{Result, SantaError};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the data directory, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults.
/// If it doesn't exist, default configuration is returned.
///
/// # Errors
/// * `ConfigError` - if the values cannot produce a valid assignment
pub fn load_config(data_dir: &Path) -> Result<Config> {
    let config = fs::read_config(data_dir)?;
    validate_config(&config)?;
    Ok(config)
}

/// Smallest start minimum a config may set; raising it is allowed, lowering is not
pub const MIN_PARTICIPANTS_FLOOR: usize = 3;

/// Reject settings that would weaken the start guard or make `start` impossible.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.min_participants < MIN_PARTICIPANTS_FLOOR {
        return Err(SantaError::ConfigError(format!(
            "min_participants must be at least {}, got {}",
            MIN_PARTICIPANTS_FLOOR, config.min_participants
        )));
    }
    if config.max_assignment_attempts == 0 {
        return Err(SantaError::ConfigError(
            "max_assignment_attempts must be positive".to_string(),
        ));
    }
    if config.data_file.trim().is_empty() {
        return Err(SantaError::ConfigError("data_file must not be empty".to_string()));
    }
    Ok(())
}
