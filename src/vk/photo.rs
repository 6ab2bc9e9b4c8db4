/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::vk::parsers::{from_null_to_zero, from_number_or_str};
use serde::Deserialize;

/// One photo as returned by `photos.get` with `extended=1` and `photo_sizes=1`.
///
/// See [VK API Docs](https://dev.vk.com/en/reference/objects/photo) for more
/// details on the individual fields.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PhotoRecord {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub owner_id: i64,

    #[serde(default)]
    pub sizes: Vec<SizeVariant>,

    #[serde(default)]
    pub likes: Likes,

    // Opaque to us, the API sends a unix timestamp
    #[serde(deserialize_with = "from_number_or_str")]
    pub date: String,
}

impl PhotoRecord {
    pub fn likes_count(&self) -> u64 {
        self.likes.count
    }

    /// The rendition with the largest area.
    ///
    /// On equal area the one listed first by the API wins. `None` only when the API sent
    /// no sizes at all.
    pub fn best_variant(&self) -> Option<&SizeVariant> {
        self.sizes
            .iter()
            .reduce(|best, v| if v.area() > best.area() { v } else { best })
    }
}

/// One resolution of a photo
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SizeVariant {
    #[serde(alias = "src")]
    pub url: String,

    #[serde(rename = "type")]
    pub size_type: String,

    #[serde(default, deserialize_with = "from_null_to_zero")]
    pub width: u32,

    #[serde(default, deserialize_with = "from_null_to_zero")]
    pub height: u32,
}

impl SizeVariant {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Likes {
    pub count: u64,

    #[serde(default)]
    pub user_likes: u8,
}
