/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use num_enum::FromPrimitive;
use std::fmt;

/// Outcome of a Yandex Disk request, decoded once from the HTTP status code.
///
/// See [Yandex Disk REST API](https://yandex.com/dev/disk-api/doc/en/) for what each
/// endpoint answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u16)]
pub enum DiskStatus {
    // Upload link issued
    Ok = 200,
    // Folder created
    Created = 201,
    // Fetch-by-URL queued on the Disk side
    Accepted = 202,
    // Folder already there
    AlreadyExists = 409,

    #[num_enum(catch_all)]
    Other(u16),
}

impl DiskStatus {
    /// Numeric HTTP status this outcome was decoded from
    pub fn code(&self) -> u16 {
        match self {
            DiskStatus::Ok => 200,
            DiskStatus::Created => 201,
            DiskStatus::Accepted => 202,
            DiskStatus::AlreadyExists => 409,
            DiskStatus::Other(code) => *code,
        }
    }
}

impl From<reqwest::StatusCode> for DiskStatus {
    fn from(status: reqwest::StatusCode) -> Self {
        DiskStatus::from_primitive(status.as_u16())
    }
}

impl fmt::Display for DiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskStatus::Other(code) => write!(f, "HTTP {}", code),
            named => write!(f, "{:?} ({})", named, named.code()),
        }
    }
}
