/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod manifest;
pub mod naming;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use manifest::*;
pub use naming::*;
pub use pipeline::*;
pub use sink::*;
pub use source::*;
