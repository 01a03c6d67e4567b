// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::StoreError;
use crate::event::Event;

/// The event collection persisted as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
}

impl EventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the collection. A missing file is an empty collection.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<Event>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(a) => a,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("event store not found, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let events: Vec<Event> =
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(count = events.len(), "loaded events");
        Ok(events)
    }

    /// Replaces the stored collection, creating parent directories as needed.
    #[tracing::instrument(skip(self, events), fields(path = %self.path.display(), count = events.len()))]
    pub async fn save(&self, events: &[Event]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|a| !a.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        let content = serde_json::to_string_pretty(events).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content)
            .await
            .map_err(|source| self.io_error(source))?;

        tracing::debug!("saved events");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
