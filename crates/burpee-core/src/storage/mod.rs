mod config;

pub use config::{Config, SoundConfig, WorkoutDefaults};

use std::path::PathBuf;

/// Returns `~/.config/burpee[-dev]/` based on BURPEE_ENV.
///
/// Set BURPEE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BURPEE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("burpee-dev")
    } else {
        base_dir.join("burpee")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
