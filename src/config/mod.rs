//! Configuration for secret-santa

mod loader;

pub use loader::{load_config, validate_config};
