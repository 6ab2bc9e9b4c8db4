/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::BackupError;
use std::fmt;
use std::str::FromStr;
use strum_macros::{EnumString, IntoStaticStr};

/// Albums every VK account has
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SystemAlbum {
    Profile,
    Wall,
    Saved,
}

/// Album to read photos from, either a system album or a user album id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumId {
    System(SystemAlbum),
    Id(u64),
}

impl Default for AlbumId {
    fn default() -> Self {
        AlbumId::System(SystemAlbum::Profile)
    }
}

impl FromStr for AlbumId {
    type Err = BackupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(system) = SystemAlbum::from_str(&s.to_lowercase()) {
            return Ok(AlbumId::System(system));
        }
        s.parse::<u64>()
            .map(AlbumId::Id)
            .map_err(|_| BackupError::Config(format!("Invalid album id: {}", s)))
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlbumId::System(system) => {
                let name: &'static str = (*system).into();
                f.write_str(name)
            }
            AlbumId::Id(id) => write!(f, "{}", id),
        }
    }
}
