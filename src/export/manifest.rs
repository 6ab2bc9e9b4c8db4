/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::BackupError;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::path::Path;

// Default location of the manifest, relative to the working directory
pub const DEFAULT_MANIFEST_PATH: &str = "photos_metadata.json";

/// Record of one stored photo
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file_name: String,

    pub size: String,
}

/// Every photo stored in one export run, in the order they were stored.
///
/// Serialized as a bare JSON array.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ExportManifest {
    entries: Vec<ManifestEntry>,
}

impl ExportManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file_name: &str, size: &str) {
        self.entries.push(ManifestEntry {
            file_name: file_name.into(),
            size: size.into(),
        });
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the manifest with four space indentation
    pub fn to_json(&self) -> Result<Vec<u8>, BackupError> {
        let mut data = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut data, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        Ok(data)
    }

    /// Writes the manifest to `path`, replacing whatever was there
    pub async fn write(&self, path: &Path) -> Result<(), BackupError> {
        let data = self.to_json()?;
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    /// Reads a manifest written by [`ExportManifest::write`]
    pub async fn read(path: &Path) -> Result<Self, BackupError> {
        let data = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}
