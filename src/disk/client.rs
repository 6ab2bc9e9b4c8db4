/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::disk::DiskStatus;
use crate::errors::BackupError;
use bytes::Bytes;
use chrono::Local;
use serde::Deserialize;
use std::path::Path;

// Root Yandex Disk API
pub const DISK_API_ORIGIN: &str = "https://cloud-api.yandex.net";

/// Talks to the Yandex Disk REST API on behalf of one OAuth token.
///
/// Every file is placed under a single backup folder which is named once, when the
/// client is created, after the local time (`Backup_files_%Y-%m-%d_%H-%M-%S`).
#[derive(Clone)]
pub struct DiskClient {
    token: String,
    folder: String,
    origin: String,
    https_client: reqwest::Client,
}

impl DiskClient {
    const RESOURCES_URI: &'static str = "/v1/disk/resources";
    const UPLOAD_URI: &'static str = "/v1/disk/resources/upload";

    /// Creates a new client from an OAuth token
    pub fn new(token: &str) -> Self {
        Self {
            token: token.into(),
            folder: Self::generate_folder_name(),
            origin: DISK_API_ORIGIN.into(),
            https_client: reqwest::Client::new(),
        }
    }

    /// Uses the given folder instead of the generated one
    pub fn with_folder(mut self, folder: &str) -> Self {
        self.folder = folder.into();
        self
    }

    /// Points the client at another API origin
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.into();
        self
    }

    /// Name of the folder uploads land in
    pub fn folder(&self) -> &str {
        &self.folder
    }

    fn generate_folder_name() -> String {
        Local::now().format("Backup_files_%Y-%m-%d_%H-%M-%S").to_string()
    }

    /// Path on the Disk for a file inside the backup folder
    pub fn resource_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.folder, file_name)
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.token)
    }

    fn endpoint(&self, uri: &str, params: &[(&str, &str)]) -> Result<url::Url, BackupError> {
        let base = url::Url::parse(&self.origin)?.join(uri)?;
        Ok(url::Url::parse_with_params(base.as_str(), params)?)
    }

    /// Creates the backup folder.
    ///
    /// Succeeds with [`DiskStatus::Created`] or [`DiskStatus::AlreadyExists`], anything
    /// else is a [`BackupError::FolderCreation`].
    pub async fn create_folder(&self) -> Result<DiskStatus, BackupError> {
        let req_url = self.endpoint(Self::RESOURCES_URI, &[("path", self.folder.as_str())])?;
        let resp = self
            .https_client
            .put(req_url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        match DiskStatus::from(resp.status()) {
            DiskStatus::Created => {
                log::info!("Folder '{}' created successfully.", self.folder);
                Ok(DiskStatus::Created)
            }
            DiskStatus::AlreadyExists => {
                log::info!("Folder '{}' already exists.", self.folder);
                Ok(DiskStatus::AlreadyExists)
            }
            status => {
                log::debug!("Create folder response: {}", error_body(resp).await);
                Err(BackupError::FolderCreation(status))
            }
        }
    }

    /// Asks the Disk for a link that a file at `file_name` can be PUT to
    pub async fn upload_link(&self, file_name: &str) -> Result<UploadLink, BackupError> {
        let path = self.resource_path(file_name);
        let req_url = self.endpoint(
            Self::UPLOAD_URI,
            &[("path", path.as_str()), ("overwrite", "true")],
        )?;
        let resp = self
            .https_client
            .get(req_url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        match DiskStatus::from(resp.status()) {
            DiskStatus::Ok => Ok(resp.json::<UploadLink>().await?),
            status => {
                log::debug!("Upload link response: {}", error_body(resp).await);
                Err(BackupError::UploadLink { path, status })
            }
        }
    }

    /// Uploads bytes held in memory as `file_name` in the backup folder
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        data: impl Into<Bytes>,
    ) -> Result<(), BackupError> {
        let link = self.upload_link(file_name).await?;
        let resp = self
            .https_client
            .put(link.href.as_str())
            .body(data.into())
            .send()
            .await?;

        match DiskStatus::from(resp.status()) {
            DiskStatus::Created | DiskStatus::Accepted | DiskStatus::Ok => {
                log::info!("File '{}' uploaded successfully.", file_name);
                Ok(())
            }
            status => {
                log::debug!("Upload response: {}", error_body(resp).await);
                Err(BackupError::Upload {
                    file_name: file_name.into(),
                    status,
                })
            }
        }
    }

    /// Uploads a local file, keeping its base name
    pub async fn upload_file(&self, local_path: &Path) -> Result<(), BackupError> {
        let file_name = local_path
            .file_name()
            .and_then(|v| v.to_str())
            .ok_or_else(|| {
                BackupError::Config(format!("Not a file path: {}", local_path.display()))
            })?
            .to_string();
        let data = tokio::fs::read(local_path).await?;
        self.upload_bytes(&file_name, data).await
    }

    /// Has the Disk fetch `source_url` itself and store it as `file_name`.
    ///
    /// The transfer only counts once the Disk answers [`DiskStatus::Accepted`].
    pub async fn upload_from_url(
        &self,
        source_url: &str,
        file_name: &str,
    ) -> Result<(), BackupError> {
        let path = self.resource_path(file_name);
        let req_url = self.endpoint(
            Self::UPLOAD_URI,
            &[
                ("path", path.as_str()),
                ("url", source_url),
                ("overwrite", "true"),
            ],
        )?;
        let resp = self
            .https_client
            .post(req_url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        match DiskStatus::from(resp.status()) {
            DiskStatus::Accepted => {
                log::debug!("Disk accepted fetch of {} into {}", source_url, path);
                Ok(())
            }
            status => {
                log::debug!("Upload from url response: {}", error_body(resp).await);
                Err(BackupError::Upload {
                    file_name: file_name.into(),
                    status,
                })
            }
        }
    }
}

impl std::fmt::Debug for DiskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskClient")
            .field("token", &"xxx")
            .field("folder", &self.folder)
            .finish()
    }
}

async fn error_body(resp: reqwest::Response) -> String {
    resp.text().await.unwrap_or_default()
}

/// Where a file can be uploaded to, as handed out by the Disk
#[derive(Deserialize, Debug, Clone)]
pub struct UploadLink {
    pub href: String,

    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub templated: bool,
}
