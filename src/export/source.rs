/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::BackupError;
use crate::vk::{AlbumId, PhotoRecord, VkClient};

/// Somewhere photos can be listed from
pub trait PhotoSource {
    /// At most `limit` photos of `album`, in the order the source lists them
    fn fetch_photos(
        &self,
        album: &AlbumId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<PhotoRecord>, BackupError>>;
}

impl PhotoSource for VkClient {
    async fn fetch_photos(
        &self,
        album: &AlbumId,
        limit: usize,
    ) -> Result<Vec<PhotoRecord>, BackupError> {
        VkClient::fetch_photos(self, album, limit).await
    }
}
