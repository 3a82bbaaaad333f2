//! CLI command implementations

pub mod cancel;
pub mod create;
pub mod join;
pub mod leave;
pub mod start;
pub mod status;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::load_config;
use crate::errors::Result;
use crate::exchange::Exchange;
use crate::fs::resolve_data_dir;
use crate::schemas::Config;
use crate::store::JsonFileStore;

/// Everything a command needs: resolved paths, config, and the exchange
pub struct Session {
    pub data_dir: PathBuf,
    pub config: Config,
    pub exchange: Exchange<JsonFileStore>,
}

impl Session {
    pub fn open(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir);
        let config = load_config(&data_dir)?;
        let exchange = Exchange::open(&data_dir, &config);
        debug!(data_dir = %data_dir.display(), store = %exchange.store().path().display(), "Session opened");
        Ok(Session {
            data_dir,
            config,
            exchange,
        })
    }
}
