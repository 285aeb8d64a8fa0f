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

//! Pins the frames of whole sheets against unused-frame eviction.

use super::SpriteFrameCache;
use khora_core::asset::{AssetHandle, SpriteFrame};
use std::collections::HashMap;

/// Holds an extra handle to every frame of the sheets it retains.
///
/// While a sheet is retained, its frames have a reference count above one,
/// so [`SpriteFrameCache::remove_unused_frames`] leaves them alone. Explicit
/// removals still apply; the retainer only keeps the frames themselves alive.
#[derive(Debug, Default)]
pub struct SpriteFrameRetainer {
    retained: HashMap<String, Vec<AssetHandle<SpriteFrame>>>,
}

impl SpriteFrameRetainer {
    /// Creates a retainer that pins nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins every frame currently attributed to the sheet at `sheet_path`.
    ///
    /// Retaining an already retained sheet replaces its pins with the frames
    /// the cache holds now, which picks up handles swapped in by a reload.
    /// Returns `false` if the sheet has no cached frame, in which case any
    /// earlier pins for it are dropped.
    pub fn retain(&mut self, cache: &SpriteFrameCache, sheet_path: &str) -> bool {
        let handles: Vec<_> = match cache.sheet(sheet_path) {
            Some(sheet) => sheet
                .frame_names()
                .filter_map(|name| cache.find_frame(name).cloned())
                .collect(),
            None => Vec::new(),
        };

        if handles.is_empty() {
            log::debug!("SpriteFrameRetainer: sheet '{sheet_path}' has no cached frame");
            self.retained.remove(sheet_path);
            return false;
        }

        self.retained.insert(sheet_path.to_string(), handles);
        true
    }

    /// Drops the pins held for `sheet_path`. Returns `false` if it was not retained.
    pub fn release(&mut self, sheet_path: &str) -> bool {
        self.retained.remove(sheet_path).is_some()
    }

    /// Drops every pin.
    pub fn release_all(&mut self) {
        self.retained.clear();
    }

    /// Returns `true` if `sheet_path` is currently retained.
    pub fn is_retained(&self, sheet_path: &str) -> bool {
        self.retained.contains_key(sheet_path)
    }

    /// The number of frame handles held across all retained sheets.
    pub fn retained_frame_count(&self) -> usize {
        self.retained.values().map(Vec::len).sum()
    }
}
