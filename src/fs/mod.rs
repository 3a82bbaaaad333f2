//! File system utilities for secret-santa
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_json, read_store, write_json, write_store};
pub use paths::{
    get_config_path, get_outbox_root, get_store_path, is_plain_file_name, resolve_data_dir,
    DEFAULT_DATA_DIR,
};
