//! Config schema - Configuration for secret-santa

use serde::{Deserialize, Serialize};

/// Main configuration, read from `config.json` in the data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// File name of the event document, relative to the data directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Directory for delivered assignment notices, relative to the data directory
    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: String,

    /// Participants required before the organizer may start
    #[serde(default = "default_min_participants")]
    pub min_participants: usize,

    /// Cap on derangement resampling before giving up
    #[serde(default = "default_max_assignment_attempts")]
    pub max_assignment_attempts: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_data_file() -> String {
    "secretsanta.json".to_string()
}

fn default_outbox_dir() -> String {
    "outbox".to_string()
}

fn default_min_participants() -> usize {
    3
}

fn default_max_assignment_attempts() -> u32 {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: default_schema_version(),
            data_file: default_data_file(),
            outbox_dir: default_outbox_dir(),
            min_participants: default_min_participants(),
            max_assignment_attempts: default_max_assignment_attempts(),
        }
    }
}
