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

/// Tunables shared by the sprite sheet loader lanes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLoaderSettings {
    /// Extension given to the sheet path to find its texture when the sheet
    /// names none.
    pub texture_extension: String,
    /// If `true`, a load leaves frames whose name is already cached untouched.
    /// Reloads always replace.
    pub skip_existing_frames: bool,
}

impl SheetLoaderSettings {
    /// Parses settings from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }
}

impl Default for SheetLoaderSettings {
    fn default() -> Self {
        Self {
            texture_extension: "png".to_string(),
            skip_existing_frames: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SheetLoaderSettings::default();
        assert_eq!(settings.texture_extension, "png");
        assert!(settings.skip_existing_frames);
    }

    #[test]
    fn test_from_ron_partial() {
        let settings = SheetLoaderSettings::from_ron_str("(texture_extension: \"webp\")").unwrap();
        assert_eq!(settings.texture_extension, "webp");
        assert!(settings.skip_existing_frames);
    }
}
