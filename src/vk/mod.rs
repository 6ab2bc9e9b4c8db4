/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod album;
pub mod client;
mod parsers;
pub mod photo;

pub use album::*;
pub use client::*;
pub use photo::*;
