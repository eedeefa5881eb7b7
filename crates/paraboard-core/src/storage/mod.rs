mod cache;
mod config;

pub use cache::PageCache;
pub use config::{AnimationConfig, CacheConfig, Config, RefreshConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/paraboard/`, or `$PARABOARD_HOME` when set.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("PARABOARD_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("paraboard"),
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
