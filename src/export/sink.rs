/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::disk::DiskClient;
use crate::errors::BackupError;
use crate::export::TransferItem;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Somewhere photos can be stored
pub trait PhotoSink {
    /// What storing a photo is called in progress messages
    const ACTION: &'static str;

    /// Called once before anything is stored
    fn prepare(&self) -> impl Future<Output = Result<(), BackupError>>;

    /// Stores one photo under its assigned file name
    fn store(&self, item: &TransferItem) -> impl Future<Output = Result<(), BackupError>>;
}

impl PhotoSink for DiskClient {
    const ACTION: &'static str = "Uploaded to disk";

    async fn prepare(&self) -> Result<(), BackupError> {
        self.create_folder().await.map(|_| ())
    }

    async fn store(&self, item: &TransferItem) -> Result<(), BackupError> {
        self.upload_from_url(&item.source_url, &item.file_name).await
    }
}

/// Downloads photos into a local directory
#[derive(Debug, Clone)]
pub struct LocalSink {
    dir: PathBuf,
    https_client: reqwest::Client,
}

impl LocalSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            https_client: reqwest::Client::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn download(&self, url: &str, download_path: &Path) -> Result<(), BackupError> {
        let resp = self.https_client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(BackupError::Download {
                url: url.into(),
                status: resp.status().as_u16(),
            });
        }

        // Streamed into a .part file that is renamed once complete
        let part_path = download_path.with_extension("part");
        let result = Self::write_part(resp, &part_path).await;
        let result = match result {
            Ok(()) => fs::rename(&part_path, download_path)
                .await
                .map_err(BackupError::from),
            Err(e) => Err(e),
        };
        if result.is_err() {
            let _ = fs::remove_file(&part_path).await;
        }
        result
    }

    async fn write_part(resp: reqwest::Response, part_path: &Path) -> Result<(), BackupError> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(part_path)
            .await?;

        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;
        Ok(())
    }
}

impl PhotoSink for LocalSink {
    const ACTION: &'static str = "Downloaded";

    async fn prepare(&self) -> Result<(), BackupError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    async fn store(&self, item: &TransferItem) -> Result<(), BackupError> {
        let download_path = self.dir.join(&item.file_name);
        self.download(&item.source_url, &download_path).await
    }
}
