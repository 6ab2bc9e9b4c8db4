/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::BackupError;
use crate::vk::{AlbumId, PhotoRecord};
use async_stream::try_stream;
use futures::{Stream, StreamExt, TryStreamExt};
use serde::Deserialize;
use serde::de::DeserializeOwned;

// Root VK API
pub const VK_API_ORIGIN: &str = "https://api.vk.com";

// Version of the API the requests are written against
pub const VK_API_VERSION: &str = "5.131";

// Largest page photos.get hands out
pub const MAX_PAGE_SIZE: usize = 1000;

/// Reads photos of one VK user through the VK API.
#[derive(Clone)]
pub struct VkClient {
    access_token: String,
    user_id: String,
    api_version: String,
    origin: String,
    https_client: reqwest::Client,
}

impl VkClient {
    const PHOTOS_GET_URI: &'static str = "/method/photos.get";

    /// Creates a client reading the photos of `user_id`
    pub fn new(access_token: &str, user_id: &str) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: user_id.into(),
            api_version: VK_API_VERSION.into(),
            origin: VK_API_ORIGIN.into(),
            https_client: reqwest::Client::new(),
        }
    }

    /// Uses another API version than [`VK_API_VERSION`]
    pub fn with_api_version(mut self, version: &str) -> Self {
        self.api_version = version.into();
        self
    }

    /// Points the client at another API origin
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Performs a get request to a VK API method and unwraps the response envelope
    pub async fn get<T: DeserializeOwned>(
        &self,
        method_uri: &str,
        params: &[(&str, String)],
    ) -> Result<T, BackupError> {
        let mut all_params: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all_params.push(("access_token", self.access_token.as_str()));
        all_params.push(("v", self.api_version.as_str()));

        let base = url::Url::parse(&self.origin)?.join(method_uri)?;
        let req_url = url::Url::parse_with_params(base.as_str(), &all_params)?;
        let body = self
            .https_client
            .get(req_url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let body = serde_json::from_slice::<ResponseBody<T>>(&body)?;
        body.into_payload()
    }

    fn photo_params(
        &self,
        album: &AlbumId,
        offset: usize,
        count: usize,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("owner_id", self.user_id.clone()),
            ("album_id", album.to_string()),
            ("extended", "1".into()),
            ("photo_sizes", "1".into()),
            ("offset", offset.to_string()),
            ("count", count.to_string()),
        ]
    }

    fn photo_pages<'a>(
        &'a self,
        album: &'a AlbumId,
        page_size: usize,
    ) -> impl Stream<Item = Result<PhotoRecord, BackupError>> + 'a {
        try_stream! {
            let mut offset = 0;
            loop {
                let params = self.photo_params(album, offset, page_size);
                let page = self
                    .get::<PhotosResponse>(Self::PHOTOS_GET_URI, &params)
                    .await?;
                log::debug!(
                    "Fetched {} photos at offset {} of {:?}",
                    page.items.len(),
                    offset,
                    page.count
                );

                let fetched = page.items.len();
                let total = page.count;
                for photo in page.items {
                    yield photo
                }

                offset += fetched;
                if is_last_page(fetched, page_size, offset, total) {
                    break;
                }
            }
        }
    }

    /// Streams every photo in the album, in the order the API lists them
    pub fn photos<'a>(
        &'a self,
        album: &'a AlbumId,
    ) -> impl Stream<Item = Result<PhotoRecord, BackupError>> + 'a {
        self.photo_pages(album, MAX_PAGE_SIZE)
    }

    /// Returns at most `limit` photos of the album, in the order the API lists them
    pub async fn fetch_photos(
        &self,
        album: &AlbumId,
        limit: usize,
    ) -> Result<Vec<PhotoRecord>, BackupError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.photo_pages(album, limit.min(MAX_PAGE_SIZE))
            .take(limit)
            .try_collect()
            .await
    }
}

impl std::fmt::Debug for VkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VkClient")
            .field("access_token", &"xxx")
            .field("user_id", &self.user_id)
            .field("api_version", &self.api_version)
            .finish()
    }
}

// A short page ends the album, as does reaching the total when the API reports one
fn is_last_page(fetched: usize, page_size: usize, offset: usize, total: Option<u64>) -> bool {
    fetched < page_size || total.is_some_and(|total| offset as u64 >= total)
}

// Base expected response body to be returned from the API
#[derive(Deserialize, Debug)]
struct ResponseBody<ResponseType> {
    response: Option<ResponseType>,

    error: Option<ApiErrorBody>,
}

impl<ResponseType> ResponseBody<ResponseType> {
    fn into_payload(self) -> Result<ResponseType, BackupError> {
        if let Some(error) = self.error {
            return Err(BackupError::ApiResponse(error.error_code, error.error_msg));
        }
        self.response.ok_or(BackupError::ResponseMissing())
    }
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    error_code: i64,

    #[serde(default)]
    error_msg: String,
}

// Expected response from photos.get
#[derive(Deserialize, Debug)]
struct PhotosResponse {
    count: Option<u64>,

    items: Vec<PhotoRecord>,
}
