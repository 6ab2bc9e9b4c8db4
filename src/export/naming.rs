/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::BackupError;
use crate::vk::PhotoRecord;
use std::collections::HashSet;

/// A photo ready to be stored: where to get it, what to call it and which rendition it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferItem {
    pub photo_id: i64,
    pub source_url: String,
    pub file_name: String,
    pub size_type: String,
}

/// Picks the best rendition of every photo and gives each one a file name unique in this run.
///
/// Names are `{likes}.jpg`. A photo whose name is taken gets `{likes}_{date}.jpg`, and if that
/// is taken too a counter is added: `{likes}_{date}_1.jpg`, `{likes}_{date}_2.jpg`, ...
///
/// One result per photo, in the order given. A photo without any size can't be stored and
/// comes back as [`BackupError::NoSizes`].
pub fn assign_names(photos: &[PhotoRecord]) -> Vec<Result<TransferItem, BackupError>> {
    let mut taken: HashSet<String> = HashSet::with_capacity(photos.len());
    let mut items = Vec::with_capacity(photos.len());

    for photo in photos {
        let Some(best) = photo.best_variant() else {
            items.push(Err(BackupError::NoSizes { photo_id: photo.id }));
            continue;
        };

        let likes = photo.likes_count();
        let mut file_name = format!("{}.jpg", likes);
        if taken.contains(&file_name) {
            file_name = format!("{}_{}.jpg", likes, photo.date);
            let mut counter = 1;
            while taken.contains(&file_name) {
                file_name = format!("{}_{}_{}.jpg", likes, photo.date, counter);
                counter += 1;
            }
        }
        taken.insert(file_name.clone());

        items.push(Ok(TransferItem {
            photo_id: photo.id,
            source_url: best.url.clone(),
            file_name,
            size_type: best.size_type.clone(),
        }));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vk::{Likes, SizeVariant};

    fn photo(likes: u64, date: &str, sizes: &[(&str, u32, u32)]) -> PhotoRecord {
        PhotoRecord {
            id: likes as i64,
            owner_id: 0,
            sizes: sizes
                .iter()
                .map(|(t, w, h)| SizeVariant {
                    url: format!("https://sun9.userapi.com/{}_{}.jpg", date, t),
                    size_type: t.to_string(),
                    width: *w,
                    height: *h,
                })
                .collect(),
            likes: Likes {
                count: likes,
                user_likes: 0,
            },
            date: date.into(),
        }
    }

    fn names(items: &[Result<TransferItem, BackupError>]) -> Vec<&str> {
        items
            .iter()
            .filter_map(|i| i.as_ref().ok())
            .map(|i| i.file_name.as_str())
            .collect()
    }

    #[test]
    fn distinct_likes_keep_plain_names() {
        let items = assign_names(&[
            photo(3, "1", &[("x", 10, 10)]),
            photo(7, "2", &[("x", 10, 10)]),
            photo(0, "3", &[("x", 10, 10)]),
        ]);
        assert_eq!(names(&items), vec!["3.jpg", "7.jpg", "0.jpg"]);
    }

    #[test]
    fn same_likes_falls_back_to_date() {
        let items = assign_names(&[
            photo(5, "111", &[("x", 100, 100), ("z", 200, 200)]),
            photo(5, "222", &[("y", 50, 50)]),
        ]);
        let items: Vec<TransferItem> = items.into_iter().map(|i| i.unwrap()).collect();
        assert_eq!(
            items,
            vec![
                TransferItem {
                    photo_id: 5,
                    source_url: "https://sun9.userapi.com/111_z.jpg".into(),
                    file_name: "5.jpg".into(),
                    size_type: "z".into(),
                },
                TransferItem {
                    photo_id: 5,
                    source_url: "https://sun9.userapi.com/222_y.jpg".into(),
                    file_name: "5_222.jpg".into(),
                    size_type: "y".into(),
                },
            ]
        );
    }

    #[test]
    fn same_likes_and_date_get_counter() {
        let items = assign_names(&[
            photo(5, "111", &[("x", 1, 1)]),
            photo(5, "111", &[("x", 1, 1)]),
            photo(5, "111", &[("x", 1, 1)]),
        ]);
        assert_eq!(names(&items), vec!["5.jpg", "5_111.jpg", "5_111_1.jpg"]);
    }

    #[test]
    fn nothing_dropped_on_collision() {
        let photos: Vec<PhotoRecord> = (0..10)
            .map(|i| photo(1, &i.to_string(), &[("x", 1, 1)]))
            .collect();
        let items = assign_names(&photos);
        assert_eq!(items.len(), 10);
        let unique: HashSet<&str> = names(&items).into_iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn photo_without_sizes_is_reported() {
        let items = assign_names(&[photo(1, "1", &[]), photo(2, "2", &[("m", 1, 1)])]);
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Err(BackupError::NoSizes { photo_id: 1 })));
        assert_eq!(names(&items), vec!["2.jpg"]);
    }
}
