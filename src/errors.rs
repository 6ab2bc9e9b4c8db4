/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::disk::DiskStatus;
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Request network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("API Response was error: {0}, msg: {1}")]
    ApiResponse(i64, String),

    #[error("Expected response missing")]
    ResponseMissing(),

    #[error("Upload of {file_name} was not accepted: {status}")]
    Upload { file_name: String, status: DiskStatus },

    #[error("Failed getting upload link for {path}: {status}")]
    UploadLink { path: String, status: DiskStatus },

    #[error("Failed creating folder: {0}")]
    FolderCreation(DiskStatus),

    #[error("Photo {photo_id} has no sizes")]
    NoSizes { photo_id: i64 },

    #[error("Download of {url} failed: {status}")]
    Download { url: String, status: u16 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BackupError {
    /// True for failures that happened before the remote side answered
    pub fn is_network(&self) -> bool {
        matches!(self, BackupError::Request(_))
    }
}
