// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the on-disk layout of a sprite sheet description.
///
/// Formats are small integers chosen by whoever registers the matching loader.
/// The engine reserves the values below [`SpriteSheetFormat::CUSTOM`]; user
/// formats should start there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteSheetFormat(pub u32);

impl SpriteSheetFormat {
    /// No loader. Used by sheets that are not backed by a file.
    pub const NONE: Self = Self(0);
    /// The built-in property-list format.
    pub const PLIST: Self = Self(1);
    /// TexturePacker JSON, hash or array layout.
    pub const JSON: Self = Self(2);
    /// First identifier available for application-defined formats.
    pub const CUSTOM: Self = Self(1000);
}

impl Default for SpriteSheetFormat {
    fn default() -> Self {
        Self::PLIST
    }
}

impl fmt::Display for SpriteSheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => write!(f, "none"),
            Self::PLIST => write!(f, "plist"),
            Self::JSON => write!(f, "json"),
            Self(id) => write!(f, "custom#{id}"),
        }
    }
}
