/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::disk::DiskClient;
use crate::errors::BackupError;
use crate::export::{
    DEFAULT_MANIFEST_PATH, ExportManifest, LocalSink, PhotoSink, PhotoSource, TransferItem,
    assign_names,
};
use crate::vk::AlbumId;
use std::path::{Path, PathBuf};

/// Copies the most recent photos of an album from a [`PhotoSource`] into a [`PhotoSink`].
///
/// A run fetches the photos, names them (see [`assign_names`]), prepares the sink, stores
/// the photos one after another and finally writes the manifest of what was stored.
///
/// Only a failed fetch or a failed manifest write ends a run with an error. A photo that
/// can't be stored is logged, reported in [`ExportSummary::failed`] and left out of the
/// manifest while the run carries on, so `stored() + failed.len()` is always the number of
/// photos fetched.
#[derive(Debug)]
pub struct Exporter<S> {
    source: S,
    album: AlbumId,
    manifest_path: PathBuf,
}

impl<S: PhotoSource> Exporter<S> {
    /// Exports from the profile album and writes the manifest to [`DEFAULT_MANIFEST_PATH`]
    pub fn new(source: S) -> Self {
        Self {
            source,
            album: AlbumId::default(),
            manifest_path: DEFAULT_MANIFEST_PATH.into(),
        }
    }

    pub fn with_album(mut self, album: AlbumId) -> Self {
        self.album = album;
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Exports up to `limit` photos into `sink`
    pub async fn export<K: PhotoSink>(
        &self,
        sink: &K,
        limit: usize,
    ) -> Result<ExportSummary, BackupError> {
        let photos = self.source.fetch_photos(&self.album, limit).await?;
        log::info!("Fetched {} photos from album {}", photos.len(), self.album);

        let items = assign_names(&photos);

        if let Err(e) = sink.prepare().await {
            log::warn!("Failed preparing destination: {}", e);
        }

        let mut manifest = ExportManifest::new();
        let mut failed = Vec::new();
        for named in items {
            let item = match named {
                Ok(item) => item,
                Err(error) => {
                    log::warn!("Skipping photo: {}", error);
                    failed.push(FailedTransfer::unnamed(error));
                    continue;
                }
            };
            match sink.store(&item).await {
                Ok(()) => {
                    manifest.push(&item.file_name, &item.size_type);
                    log::info!("{}: {}", K::ACTION, item.file_name);
                }
                Err(error) if error.is_network() => {
                    log::warn!("Could not reach destination for {}: {}", item.file_name, error);
                    failed.push(FailedTransfer::named(item, error));
                }
                Err(error) => {
                    log::warn!("Failed to store {}: {}", item.source_url, error);
                    failed.push(FailedTransfer::named(item, error));
                }
            }
        }

        manifest.write(&self.manifest_path).await?;
        log::info!("Metadata saved to {}", self.manifest_path.display());

        Ok(ExportSummary {
            fetched: photos.len(),
            manifest,
            failed,
            manifest_path: self.manifest_path.clone(),
        })
    }

    /// Downloads up to `limit` photos into `dir`
    pub async fn export_local(
        &self,
        dir: impl Into<PathBuf>,
        limit: usize,
    ) -> Result<ExportSummary, BackupError> {
        self.export(&LocalSink::new(dir), limit).await
    }

    /// Has the Disk fetch up to `limit` photos into its backup folder
    pub async fn export_to_remote(
        &self,
        disk: &DiskClient,
        limit: usize,
    ) -> Result<ExportSummary, BackupError> {
        self.export(disk, limit).await
    }
}

/// What one export run did
#[derive(Debug)]
pub struct ExportSummary {
    pub fetched: usize,
    pub manifest: ExportManifest,
    pub failed: Vec<FailedTransfer>,
    pub manifest_path: PathBuf,
}

impl ExportSummary {
    pub fn stored(&self) -> usize {
        self.manifest.len()
    }
}

/// A photo that could not be stored, and why.
///
/// `item` is `None` when the photo never got as far as being named.
#[derive(Debug)]
pub struct FailedTransfer {
    pub item: Option<TransferItem>,
    pub error: BackupError,
}

impl FailedTransfer {
    fn named(item: TransferItem, error: BackupError) -> Self {
        Self {
            item: Some(item),
            error,
        }
    }

    fn unnamed(error: BackupError) -> Self {
        Self { item: None, error }
    }
}
