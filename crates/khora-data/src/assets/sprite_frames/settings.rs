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

//! Configuration for the sprite frame cache.

use serde::{Deserialize, Serialize};

/// Tunables for a [`SpriteFrameCache`](super::SpriteFrameCache).
///
/// Missing fields fall back to their defaults when deserialized, so a RON
/// file only needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteFrameCacheSettings {
    /// Number of entries reserved up front in each index.
    pub initial_capacity: usize,
    /// If `true`, lookups that miss emit a diagnostic log.
    pub log_missing_frames: bool,
}

impl SpriteFrameCacheSettings {
    /// Parses settings from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }
}

impl Default for SpriteFrameCacheSettings {
    fn default() -> Self {
        Self {
            initial_capacity: 20,
            log_missing_frames: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ron_partial() {
        let settings = SpriteFrameCacheSettings::from_ron_str("(initial_capacity: 256)").unwrap();
        assert_eq!(settings.initial_capacity, 256);
        assert!(settings.log_missing_frames);
    }

    #[test]
    fn test_from_ron_invalid() {
        assert!(SpriteFrameCacheSettings::from_ron_str("(initial_capacity: \"lots\")").is_err());
    }
}
