// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary directory management for integration tests.
//!
//! This module provides utilities for creating and managing temporary
//! directories with automatic cleanup on drop.

use std::path::PathBuf;
use tokio::fs;

/// Temporary directories used for testing.
///
/// Automatically cleans up all created directories when dropped.
#[derive(Debug)]
pub struct TempDirs {
    /// Base directory, removed on drop.
    pub base: PathBuf,
    /// Path of the event store inside `base`, not created.
    pub events_path: PathBuf,
}

impl TempDirs {
    /// Creates a new temporary directory for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let base = tempfile::tempdir()?.keep();
        fs::create_dir_all(&base).await?;

        Ok(Self {
            events_path: base.join("data").join("events.json"),
            base,
        })
    }

    /// Writes raw content to the event store path.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    #[allow(dead_code)]
    pub async fn write_events(&self, content: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        if let Some(parent) = self.events_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.events_path, content).await?;
        Ok(self.events_path.clone())
    }
}

/// Sets up temporary directories for integration tests.
///
/// This is a convenience wrapper around [`TempDirs::new`].
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new().await
}

impl Drop for TempDirs {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.base) {
            tracing::warn!(path = %self.base.display(), err = %e, "failed to clean up temp directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn temp_dirs_creates_base_only() {
        let dirs = TempDirs::new().await.unwrap();

        assert!(dirs.base.is_dir());
        assert!(dirs.events_path.starts_with(&dirs.base));
        assert!(!dirs.events_path.exists());
    }

    #[tokio::test]
    async fn temp_dirs_cleanup_on_drop() {
        let base = {
            let dirs = TempDirs::new().await.unwrap();
            dirs.write_events("[]").await.unwrap();
            dirs.base.clone()
        };

        assert!(!base.exists());
    }
}
