/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # VK Backup
//!
//! Copies the most recent photos of a VK album to Yandex Disk, or into a local directory,
//! and writes a JSON manifest of what was copied.
//!
//! For further details on the APIs refer to the [VK API Docs](https://dev.vk.com/en/method/photos.get)
//! and the [Yandex Disk API Docs](https://yandex.com/dev/disk-api/doc/en/)
//!
//! ## Features
//!
//! - VK photos (Read only)
//!     - Lists the photos of a system or user album, with likes and every size
//!     - Picks the largest size of each photo
//! - Yandex Disk
//!     - Creates a dated backup folder
//!     - Uploads from memory, from a local file or by having the Disk fetch a URL itself
//! - Export runs
//!     - Unique file names from like counts
//!     - One failed photo never stops the rest
//!     - `photos_metadata.json` manifest of every stored photo
//!
//! *Getting the VK access token and the Yandex OAuth token is left up to the consumer of
//! this library*
//!
//! ## Usage
//!
//! ```no_run
//! use vk_backup::disk::DiskClient;
//! use vk_backup::export::Exporter;
//! use vk_backup::vk::{AlbumId, VkClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let vk = VkClient::new("vk access token", "1");
//!     let disk = DiskClient::new("yandex oauth token");
//!
//!     let summary = Exporter::new(vk)
//!         .with_album(AlbumId::default())
//!         .with_manifest_path("photos_metadata.json")
//!         .export_to_remote(&disk, 5)
//!         .await?;
//!
//!     println!("Stored {} photos, {} failed", summary.stored(), summary.failed.len());
//!     Ok(())
//! }
//! ```
//!
pub mod config;
pub mod disk;
pub mod errors;
pub mod export;
pub mod vk;

pub use errors::BackupError;
