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

//! The per-sheet record kept by the sprite frame cache.

use khora_core::asset::SpriteSheetFormat;
use std::collections::HashSet;
use std::mem;

/// Sheet key for frames registered one by one through
/// [`SpriteFrameCache::add_frame`](super::SpriteFrameCache::add_frame).
pub const ADD_FRAME_SHEET: &str = "by#add_frame()";

/// Sheet key for frames parsed from in-memory content through
/// [`SpriteFrameCache::add_sheet_content`](super::SpriteFrameCache::add_sheet_content).
pub const SHEET_CONTENT_SHEET: &str = "by#add_sheet_content()";

/// Records which frame names a sheet contributed to the cache.
///
/// A sheet is `full` after a load pass completed and until any one of its
/// frames is erased individually.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    path: String,
    format: SpriteSheetFormat,
    frames: HashSet<String>,
    full: bool,
}

impl SpriteSheet {
    pub(crate) fn new(path: &str, format: SpriteSheetFormat) -> Self {
        Self {
            path: path.to_string(),
            format,
            frames: HashSet::new(),
            full: false,
        }
    }

    /// The sheet's path, or one of the synthetic keys.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The format of the loader that produced this sheet.
    pub fn format(&self) -> SpriteSheetFormat {
        self.format
    }

    /// Whether no frame has been erased individually since the last load.
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// The names of the frames currently attributed to this sheet.
    pub fn frame_names(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(String::as_str)
    }

    /// Returns `true` if `name` is attributed to this sheet.
    pub fn contains(&self, name: &str) -> bool {
        self.frames.contains(name)
    }

    /// The number of frames attributed to this sheet.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frame is attributed to this sheet.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn set_format(&mut self, format: SpriteSheetFormat) {
        self.format = format;
    }

    pub(crate) fn set_full(&mut self, full: bool) {
        self.full = full;
    }

    pub(crate) fn insert(&mut self, name: &str) {
        self.frames.insert(name.to_string());
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.frames.remove(name)
    }

    pub(crate) fn take_frames(&mut self) -> HashSet<String> {
        mem::take(&mut self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut sheet = SpriteSheet::new("atlas.plist", SpriteSheetFormat::PLIST);
        sheet.insert("a.png");
        sheet.insert("a.png");
        sheet.insert("b.png");
        assert_eq!(sheet.len(), 2);
        assert!(sheet.contains("a.png"));
    }

    #[test]
    fn test_take_frames_empties_sheet() {
        let mut sheet = SpriteSheet::new("atlas.plist", SpriteSheetFormat::PLIST);
        sheet.insert("a.png");
        let taken = sheet.take_frames();
        assert!(taken.contains("a.png"));
        assert!(sheet.is_empty());
    }
}
