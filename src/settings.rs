//! Roster settings
//!
//! Passed explicitly to [`crate::Roster::open`]; there is no process-wide default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default backing store file, relative to the working directory
pub const DEFAULT_STORE_FILE: &str = "students.json";

/// Environment variable overriding the store path
pub const STORE_ENV_VAR: &str = "ROSTER_STORE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Backing store location
    pub store_path: PathBuf,
    /// Ranking size used by [`crate::Roster::top`]
    pub top_count: usize,
    /// Ranking size shown in the class report
    pub report_top_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            top_count: 5,
            report_top_count: 3,
        }
    }
}

impl Settings {
    /// Defaults, with the store path taken from `ROSTER_STORE` when set
    pub fn from_env() -> Self {
        match std::env::var_os(STORE_ENV_VAR) {
            Some(path) if !path.is_empty() => {
                log::debug!("Store path from {}: {:?}", STORE_ENV_VAR, path);
                Self::default().with_store_path(path)
            }
            _ => Self::default(),
        }
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}
