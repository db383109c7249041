//! JSON file store for the goal ledger.
//!
//! The whole ledger is written on every mutation. The file is small (at
//! most five goals), so writes are synchronous with no retry path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ledger::Goal;

/// On-disk shape of the goals file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedLedger {
    pub goals: Vec<Goal>,
    pub current_goal_index: usize,
}

/// Handle to the goals JSON file.
#[derive(Debug, Clone)]
pub struct GoalStore {
    path: PathBuf,
}

impl GoalStore {
    /// Store at `goals.json` inside the default data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            path: super::data_dir()?.join("goals.json"),
        })
    }

    /// Store at an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted ledger.
    ///
    /// A missing file is not an error and yields `None`. A present but
    /// unparsable file is an error: failing fast beats silently
    /// discarding saved goal history.
    pub fn load(&self) -> Result<Option<PersistedLedger>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the file with `state`.
    pub fn save(&self, state: &PersistedLedger) -> Result<()> {
        let content = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
