/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers;
    use dotenvy::dotenv;
    use futures::{StreamExt, pin_mut};
    use vk_backup::vk::AlbumId;

    // Disabling for ci/cd builds since I would need to get an access token
    #[ignore]
    #[tokio::test]
    async fn fetch_profile_photos() {
        dotenv().ok();
        let client = helpers::vk_client_from_env().unwrap();
        let photos = client.fetch_photos(&AlbumId::default(), 5).await.unwrap();
        assert!(photos.len() <= 5);
        for photo in &photos {
            println!("Photo: {:?}", photo.best_variant());
        }
    }

    #[ignore]
    #[tokio::test]
    async fn stream_profile_photos() {
        dotenv().ok();
        let client = helpers::vk_client_from_env().unwrap();
        let album = AlbumId::default();
        let photos = client.photos(&album);

        let mut count = 0;
        pin_mut!(photos);
        while let Some(photo_result) = photos.next().await {
            let photo = photo_result.unwrap();
            assert!(!photo.sizes.is_empty());
            count += 1;
        }
        println!("Photo count: {}", count);
    }
}
