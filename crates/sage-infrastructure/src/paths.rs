//! Path management for Sage's on-disk state.
//!
//! Profiles live under the platform data directory
//! (`~/.local/share/sage/profiles` on Linux). `SAGE_DATA_DIR` overrides the
//! base directory, and tests pass an explicit base instead.

use std::path::{Path, PathBuf};

use sage_core::config::DATA_DIR_VAR;
use sage_core::error::{Result, SageError};

/// Resolves the directories Sage stores state in.
///
/// Resolution order for the base directory:
/// 1. the explicit base passed to [`SagePaths::new`] (tests),
/// 2. the `SAGE_DATA_DIR` environment variable,
/// 3. the platform data directory plus `sage/`.
pub struct SagePaths {
    base_dir: Option<PathBuf>,
}

impl SagePaths {
    /// Creates a path resolver, optionally rooted at an explicit base.
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the base data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }

        if let Ok(dir) = std::env::var(DATA_DIR_VAR) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        dirs::data_dir()
            .map(|dir| dir.join("sage"))
            .ok_or_else(|| SageError::config("Cannot determine the platform data directory"))
    }

    /// Returns the directory holding one JSON file per user profile.
    pub fn profiles_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("profiles"))
    }
}
