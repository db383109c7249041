//! Flat-file persistence for the goal ledger.

mod goals_file;

pub use goals_file::{GoalStore, PersistedLedger};

use std::path::PathBuf;

/// Returns `~/.config/pomogoal[-dev]/` based on POMOGOAL_ENV.
///
/// Set POMOGOAL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOGOAL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomogoal-dev")
    } else {
        base_dir.join("pomogoal")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
