pub mod config;
pub mod store;

pub use config::Config;
pub use store::{StateStore, CAPACITY_TABLE, MODEL_TABLE, ZONES_TABLE};

use std::path::PathBuf;

/// Returns `~/.focustune/`, creating it if it doesn't exist.
///
/// The `FOCUSTUNE_HOME` environment variable overrides the location.
pub fn data_dir() -> PathBuf {
    let dir = match std::env::var_os("FOCUSTUNE_HOME") {
        Some(path) => PathBuf::from(path),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".focustune"),
    };
    std::fs::create_dir_all(&dir).ok();
    dir
}
