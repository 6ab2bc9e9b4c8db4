/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::BackupError;
use crate::export::DEFAULT_MANIFEST_PATH;
use crate::vk::{AlbumId, VK_API_VERSION};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// Config file read when none is given
pub const DEFAULT_CONFIG_PATH: &str = "VK_TOKEN.json";

/// Credentials and settings for a backup run.
///
/// Read from a JSON file whose keys match the environment variables that can override them:
///
/// ```json
/// {
///     "VK_ACCESS_TOKEN": "vk1.a.xxx",
///     "VK_USER_ID": "1",
///     "YANDEX_DISK_TOKEN": "y0_xxx"
/// }
/// ```
#[derive(Deserialize, Clone)]
pub struct BackupConfig {
    #[serde(rename = "VK_ACCESS_TOKEN", default)]
    pub vk_access_token: String,

    #[serde(rename = "VK_USER_ID", default)]
    pub vk_user_id: Option<String>,

    #[serde(rename = "YANDEX_DISK_TOKEN", default)]
    pub disk_token: Option<String>,

    #[serde(rename = "VK_ALBUM", default = "default_album")]
    pub album: String,

    #[serde(rename = "VK_API_VERSION", default = "default_api_version")]
    pub api_version: String,

    #[serde(rename = "PHOTO_LIMIT", default = "default_limit")]
    pub limit: usize,

    #[serde(rename = "MANIFEST_PATH", default = "default_manifest_path")]
    pub manifest_path: PathBuf,

    #[serde(rename = "SAVE_DIR", default = "default_save_dir")]
    pub save_dir: PathBuf,
}

fn default_album() -> String {
    "profile".into()
}

fn default_api_version() -> String {
    VK_API_VERSION.into()
}

fn default_limit() -> usize {
    5
}

fn default_manifest_path() -> PathBuf {
    DEFAULT_MANIFEST_PATH.into()
}

fn default_save_dir() -> PathBuf {
    "vk".into()
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            vk_access_token: String::new(),
            vk_user_id: None,
            disk_token: None,
            album: default_album(),
            api_version: default_api_version(),
            limit: default_limit(),
            manifest_path: default_manifest_path(),
            save_dir: default_save_dir(),
        }
    }
}

impl BackupConfig {
    /// Reads the config file at `path`
    pub fn from_file(path: &Path) -> Result<Self, BackupError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads the config file at `path` if there is one, otherwise starts from the defaults
    pub fn from_file_or_default(path: &Path) -> Result<Self, BackupError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Replaces values with those set in the environment
    pub fn apply_env(mut self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok());
        self
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("VK_ACCESS_TOKEN") {
            self.vk_access_token = v;
        }
        if let Some(v) = var("VK_USER_ID") {
            self.vk_user_id = Some(v);
        }
        if let Some(v) = var("YANDEX_DISK_TOKEN") {
            self.disk_token = Some(v);
        }
        if let Some(v) = var("VK_ALBUM") {
            self.album = v;
        }
        if let Some(v) = var("VK_API_VERSION") {
            self.api_version = v;
        }
        if let Some(v) = var("PHOTO_LIMIT").and_then(|v| v.parse().ok()) {
            self.limit = v;
        }
        if let Some(v) = var("MANIFEST_PATH") {
            self.manifest_path = v.into();
        }
        if let Some(v) = var("SAVE_DIR") {
            self.save_dir = v.into();
        }
    }

    /// The album to export, checked
    pub fn album_id(&self) -> Result<AlbumId, BackupError> {
        self.album.parse()
    }

    /// Fails when the values can't make up a run
    pub fn validate(&self) -> Result<(), BackupError> {
        if self.vk_access_token.trim().is_empty() {
            return Err(BackupError::Config("VK_ACCESS_TOKEN is not set".into()));
        }
        if self.vk_user_id.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(BackupError::Config("VK_USER_ID is empty".into()));
        }
        self.album_id()?;
        Ok(())
    }
}

impl std::fmt::Debug for BackupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackupConfig")
            .field("vk_access_token", &"xxx")
            .field("vk_user_id", &self.vk_user_id)
            .field("disk_token", &self.disk_token.as_ref().map(|_| "xxx"))
            .field("album", &self.album)
            .field("api_version", &self.api_version)
            .field("limit", &self.limit)
            .field("manifest_path", &self.manifest_path)
            .field("save_dir", &self.save_dir)
            .finish()
    }
}
