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

use super::{
    SpriteFrameCacheSettings, SpriteSheet, SpriteSheetError, SpriteSheetLoader, ADD_FRAME_SHEET,
    SHEET_CONTENT_SHEET,
};
use khora_core::asset::{AssetHandle, SpriteFrame, SpriteSheetFormat};
use khora_core::renderer::Texture2D;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A cache of sprite frames, indexed by name and by the sheet they came from.
///
/// The cache owns three indexes that are always updated together:
/// - frame name → frame,
/// - sheet path → [`SpriteSheet`] record,
/// - frame name → owning sheet path.
///
/// Every name in the third index is listed by the sheet it points to and is
/// present in the first. Sheets never stay in the second index once their
/// last frame is gone. Frames registered with
/// [`add_untracked_frame`](Self::add_untracked_frame) live only in the first
/// index and are ignored by sheet-level operations.
///
/// The cache holds exactly one [`AssetHandle`] per cached name and drops it
/// when the name leaves the frame index, whichever operation removed it.
///
/// All methods take `&mut self` for mutation and nothing is synchronized
/// internally. Hosts sharing a cache between threads wrap it in their own lock.
pub struct SpriteFrameCache {
    settings: SpriteFrameCacheSettings,
    frames: HashMap<String, AssetHandle<SpriteFrame>>,
    sheets: HashMap<String, SpriteSheet>,
    frame_to_sheet: HashMap<String, String>,
    loaders: HashMap<SpriteSheetFormat, Arc<dyn SpriteSheetLoader>>,
}

impl SpriteFrameCache {
    /// Creates an empty cache with default settings and no loaders.
    pub fn new() -> Self {
        Self::with_settings(SpriteFrameCacheSettings::default())
    }

    /// Creates an empty cache with the given settings and no loaders.
    pub fn with_settings(settings: SpriteFrameCacheSettings) -> Self {
        let capacity = settings.initial_capacity;
        Self {
            settings,
            frames: HashMap::with_capacity(capacity),
            sheets: HashMap::with_capacity(capacity),
            frame_to_sheet: HashMap::with_capacity(capacity),
            loaders: HashMap::new(),
        }
    }

    /// The settings this cache was created with.
    pub fn settings(&self) -> &SpriteFrameCacheSettings {
        &self.settings
    }

    // --- Loader registry ---

    /// Registers a loader under its own format id.
    ///
    /// The first loader registered for a format wins: if one is already
    /// present, nothing changes and `false` is returned.
    pub fn register_loader(&mut self, loader: Arc<dyn SpriteSheetLoader>) -> bool {
        let format = loader.format();
        if self.loaders.contains_key(&format) {
            log::debug!("SpriteFrameCache: a loader for format {format} is already registered");
            return false;
        }
        self.loaders.insert(format, loader);
        true
    }

    /// Removes the loader registered for `format`, if any.
    pub fn deregister_loader(&mut self, format: SpriteSheetFormat) -> bool {
        self.loaders.remove(&format).is_some()
    }

    /// Returns the loader registered for `format`.
    pub fn loader(&self, format: SpriteSheetFormat) -> Option<Arc<dyn SpriteSheetLoader>> {
        self.loaders.get(&format).cloned()
    }

    // --- Adding frames ---

    /// Loads the sheet at `path` with the loader registered for `format`.
    ///
    /// Returns `false` if no loader is registered for `format` or if the
    /// loader failed. Neither case is fatal; the reason is logged.
    pub fn add_sheet_file(&mut self, path: &str, format: SpriteSheetFormat) -> bool {
        self.dispatch(format, path, |loader, cache| loader.load(path, cache))
    }

    /// Loads the sheet at `path` onto an existing texture.
    pub fn add_sheet_file_with_texture(
        &mut self,
        path: &str,
        texture: AssetHandle<Texture2D>,
        format: SpriteSheetFormat,
    ) -> bool {
        self.dispatch(format, path, move |loader, cache| {
            loader.load_with_texture(path, texture, cache)
        })
    }

    /// Loads the sheet at `path` onto the texture found at `texture_path`.
    pub fn add_sheet_file_with_texture_path(
        &mut self,
        path: &str,
        texture_path: &str,
        format: SpriteSheetFormat,
    ) -> bool {
        self.dispatch(format, path, |loader, cache| {
            loader.load_with_texture_path(path, texture_path, cache)
        })
    }

    /// Loads a sheet description held in memory onto `texture`.
    ///
    /// The frames are attributed to the [`SHEET_CONTENT_SHEET`] key.
    pub fn add_sheet_content(
        &mut self,
        content: &[u8],
        texture: AssetHandle<Texture2D>,
        format: SpriteSheetFormat,
    ) -> bool {
        self.dispatch(format, SHEET_CONTENT_SHEET, move |loader, cache| {
            loader.load_from_content(content, texture, cache)
        })
    }

    /// Registers a single frame under `name`.
    ///
    /// The frame is attributed to the [`ADD_FRAME_SHEET`] key, so it takes part
    /// in sheet tracking without a backing file. An existing frame with the
    /// same name is replaced.
    ///
    /// An empty name is a programming error: it panics in debug builds and is
    /// ignored in release builds.
    pub fn add_frame(&mut self, frame: AssetHandle<SpriteFrame>, name: &str) {
        debug_assert!(!name.is_empty(), "sprite frame name should not be empty");
        if name.is_empty() {
            log::warn!("SpriteFrameCache: ignoring a frame registered with an empty name");
            return;
        }
        self.insert_frame(ADD_FRAME_SHEET, SpriteSheetFormat::NONE, name, frame);
    }

    /// Registers a single frame under `name` without any sheet attribution.
    ///
    /// Such frames can be looked up and are subject to
    /// [`remove_unused_frames`](Self::remove_unused_frames), but
    /// [`has_frame`](Self::has_frame) does not report them and no sheet-level
    /// removal or reload touches them.
    pub fn add_untracked_frame(&mut self, name: &str, frame: AssetHandle<SpriteFrame>) {
        debug_assert!(!name.is_empty(), "sprite frame name should not be empty");
        if name.is_empty() {
            log::warn!("SpriteFrameCache: ignoring a frame registered with an empty name");
            return;
        }
        self.detach_from_sheet(name);
        self.frames.insert(name.to_string(), frame);
    }

    // --- Index primitives used by loaders ---

    /// Attributes `name` to the sheet at `sheet_path` and caches `frame` under it.
    ///
    /// The sheet record is created on first use with the given `format`. If the
    /// name belonged to another sheet, it is detached from that sheet first.
    /// A frame previously cached under `name` is replaced.
    pub fn insert_frame(
        &mut self,
        sheet_path: &str,
        format: SpriteSheetFormat,
        name: &str,
        frame: AssetHandle<SpriteFrame>,
    ) {
        if self
            .frame_to_sheet
            .get(name)
            .is_some_and(|owner| owner != sheet_path)
        {
            self.detach_from_sheet(name);
        }

        self.sheets
            .entry(sheet_path.to_string())
            .or_insert_with(|| SpriteSheet::new(sheet_path, format))
            .insert(name);
        self.frames.insert(name.to_string(), frame);
        self.frame_to_sheet
            .insert(name.to_string(), sheet_path.to_string());
    }

    /// Inserts the frames produced by one load pass of a sheet.
    ///
    /// When at least one frame was inserted, the sheet records `format` and is
    /// marked full. Returns the number of frames inserted.
    pub fn insert_sheet_frames<I>(
        &mut self,
        sheet_path: &str,
        format: SpriteSheetFormat,
        frames: I,
    ) -> usize
    where
        I: IntoIterator<Item = (String, AssetHandle<SpriteFrame>)>,
    {
        let mut inserted = 0;
        for (name, frame) in frames {
            self.insert_frame(sheet_path, format, &name, frame);
            inserted += 1;
        }

        if inserted > 0 {
            if let Some(sheet) = self.sheets.get_mut(sheet_path) {
                sheet.set_format(format);
                sheet.set_full(true);
            }
        }
        inserted
    }

    /// Erases a single frame from every index.
    ///
    /// The owning sheet, if any, loses its `full` flag and is dropped once it
    /// has no frame left. The frame itself is removed from the frame index in
    /// every case.
    ///
    /// Returns `true` only if the name was attributed to a sheet. Untracked
    /// frames are still removed, but yield `false`.
    pub fn erase_frame(&mut self, name: &str) -> bool {
        let had_sheet = self.detach_from_sheet(name);
        self.frames.remove(name);
        had_sheet
    }

    /// Erases several frames. Returns `true` if any of them was attributed to a sheet.
    pub fn erase_frames<'a, I>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut any_sheet = false;
        for name in names {
            any_sheet |= self.erase_frame(name);
        }
        any_sheet
    }

    /// Erases a sheet and every frame attributed to it.
    ///
    /// Returns `false` if no sheet is recorded under `path`.
    pub fn erase_sheet(&mut self, path: &str) -> bool {
        let Some(mut sheet) = self.sheets.remove(path) else {
            return false;
        };

        for name in sheet.take_frames() {
            self.frames.remove(&name);
            self.frame_to_sheet.remove(&name);
        }
        true
    }

    fn detach_from_sheet(&mut self, name: &str) -> bool {
        let Some(path) = self.frame_to_sheet.remove(name) else {
            return false;
        };

        if let Some(sheet) = self.sheets.get_mut(&path) {
            sheet.set_full(false);
            sheet.remove(name);
            if sheet.is_empty() {
                self.sheets.remove(&path);
            }
        }
        true
    }

    // --- Removing frames ---

    /// Removes the frame cached under `name`, whatever its reference count.
    pub fn remove_frame(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.erase_frame(name);
    }

    /// Removes the sheet at `path` and all of its frames.
    ///
    /// Returns `false` if the sheet was not loaded.
    pub fn remove_sheet(&mut self, path: &str) -> bool {
        let removed = self.erase_sheet(path);
        if removed {
            log::debug!("SpriteFrameCache: removed sheet '{path}'");
        }
        removed
    }

    /// Removes every frame the cache is the only owner of.
    ///
    /// A frame is unused when no renderer or UI element holds a handle to it,
    /// i.e. when its reference count is exactly one. Returns the number of
    /// frames removed.
    pub fn remove_unused_frames(&mut self) -> usize {
        let unused: Vec<String> = self
            .frames
            .iter()
            .filter(|(_, frame)| frame.strong_count() == 1)
            .map(|(name, _)| name.clone())
            .collect();

        for name in &unused {
            log::debug!("SpriteFrameCache: removing unused frame '{name}'");
            self.erase_frame(name);
        }
        unused.len()
    }

    /// Removes every frame that samples from `texture`.
    ///
    /// Returns the number of frames removed.
    pub fn remove_frames_for_texture(&mut self, texture: &AssetHandle<Texture2D>) -> usize {
        let matching: Vec<String> = self
            .frames
            .iter()
            .filter(|(_, frame)| frame.uses_texture(texture))
            .map(|(name, _)| name.clone())
            .collect();

        self.erase_frames(matching.iter().map(String::as_str));
        matching.len()
    }

    /// Removes the frames declared by a sheet description held in memory.
    ///
    /// The loader for `format` lists the names; only those currently cached
    /// are erased. Returns the number of frames removed.
    pub fn remove_frames_from_content(
        &mut self,
        content: &[u8],
        format: SpriteSheetFormat,
    ) -> usize {
        let Some(loader) = self.loader(format) else {
            log::warn!("SpriteFrameCache: no loader registered for format {format}");
            return 0;
        };

        let names = match loader.frame_names(content) {
            Ok(names) => names,
            Err(err) => {
                log::warn!("SpriteFrameCache: cannot list frames of sheet content: {err}");
                return 0;
            }
        };

        let cached: Vec<String> = names
            .into_iter()
            .filter(|name| self.frames.contains_key(name))
            .collect();
        self.erase_frames(cached.iter().map(String::as_str));
        cached.len()
    }

    /// Empties every index. Loaders stay registered.
    pub fn clear(&mut self) {
        self.sheets.clear();
        self.frame_to_sheet.clear();
        self.frames.clear();
    }

    /// Removes every frame and sheet record, whatever their reference counts.
    pub fn remove_all_frames(&mut self) {
        log::debug!(
            "SpriteFrameCache: removing all {} frames",
            self.frames.len()
        );
        self.clear();
    }

    // --- Reloading ---

    /// Drops the sheet at `path` and loads it again with the loader that
    /// produced it.
    ///
    /// Returns `false` without touching anything if the sheet is not loaded.
    /// Otherwise the sheet's frames are removed first; if the loader has since
    /// been deregistered or fails, they are not restored and `false` is returned.
    pub fn reload(&mut self, path: &str) -> bool {
        let Some(sheet) = self.sheets.get(path) else {
            log::debug!("SpriteFrameCache: sheet '{path}' was never loaded, not reloading it");
            return false;
        };
        let format = sheet.format();

        if !self.is_sheet_in_use(path) {
            return false;
        }
        self.erase_sheet(path);

        let Some(loader) = self.loader(format) else {
            log::warn!(
                "SpriteFrameCache: sheet '{path}' dropped, no loader registered for format {format}"
            );
            return false;
        };

        match loader.reload(path, self) {
            Ok(count) => {
                log::info!("SpriteFrameCache: reloaded sheet '{path}' ({count} frames)");
                true
            }
            Err(err) => {
                log::warn!("SpriteFrameCache: failed to reload sheet '{path}': {err}");
                false
            }
        }
    }

    // --- Queries ---

    /// Returns a new handle to the frame cached under `name`.
    ///
    /// A miss is logged when [`SpriteFrameCacheSettings::log_missing_frames`] is set.
    pub fn frame(&self, name: &str) -> Option<AssetHandle<SpriteFrame>> {
        let frame = self.frames.get(name).cloned();
        if frame.is_none() && self.settings.log_missing_frames {
            log::debug!("SpriteFrameCache: frame '{name}' isn't found");
        }
        frame
    }

    /// Returns the cache's own handle to the frame cached under `name`.
    pub fn find_frame(&self, name: &str) -> Option<&AssetHandle<SpriteFrame>> {
        self.frames.get(name)
    }

    /// Returns `true` if `name` is attributed to a tracked sheet.
    ///
    /// Untracked frames are not reported; use
    /// [`contains_frame`](Self::contains_frame) to test the frame index itself.
    #[must_use]
    pub fn has_frame(&self, name: &str) -> bool {
        self.frame_to_sheet.contains_key(name)
    }

    /// Returns `true` if any frame is cached under `name`.
    #[must_use]
    pub fn contains_frame(&self, name: &str) -> bool {
        self.frames.contains_key(name)
    }

    /// Returns `true` if the sheet at `path` has at least one cached frame.
    #[must_use]
    pub fn is_sheet_in_use(&self, path: &str) -> bool {
        self.sheets.get(path).is_some_and(|sheet| !sheet.is_empty())
    }

    /// Returns `true` if the sheet at `path` is recorded and marked full.
    #[must_use]
    pub fn is_sheet_full(&self, path: &str) -> bool {
        self.sheets.get(path).is_some_and(SpriteSheet::is_full)
    }

    /// Returns `true` if the sheet at `path` is in use and none of its frames
    /// was removed individually since it was loaded.
    #[must_use]
    pub fn is_file_loaded(&self, path: &str) -> bool {
        self.is_sheet_in_use(path) && self.is_sheet_full(path)
    }

    /// Returns the record of the sheet at `path`.
    pub fn sheet(&self, path: &str) -> Option<&SpriteSheet> {
        self.sheets.get(path)
    }

    /// Returns the record of the sheet `name` is attributed to.
    pub fn sheet_of(&self, name: &str) -> Option<&SpriteSheet> {
        self.frame_to_sheet
            .get(name)
            .and_then(|path| self.sheets.get(path))
    }

    /// Iterates over every cached frame and its name.
    pub fn frames(&self) -> impl Iterator<Item = (&str, &AssetHandle<SpriteFrame>)> {
        self.frames.iter().map(|(name, frame)| (name.as_str(), frame))
    }

    /// Iterates over every recorded sheet.
    pub fn sheets(&self) -> impl Iterator<Item = &SpriteSheet> {
        self.sheets.values()
    }

    /// Iterates over the paths of every recorded sheet.
    pub fn sheet_paths(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    /// The number of cached frames, tracked or not.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The number of recorded sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Returns `true` if no frame is cached.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn dispatch<F>(&mut self, format: SpriteSheetFormat, path: &str, call: F) -> bool
    where
        F: FnOnce(&dyn SpriteSheetLoader, &mut Self) -> Result<usize, SpriteSheetError>,
    {
        let Some(loader) = self.loader(format) else {
            log::warn!("SpriteFrameCache: no loader registered for format {format}, skipping '{path}'");
            return false;
        };

        match call(loader.as_ref(), self) {
            Ok(count) => {
                log::info!("SpriteFrameCache: loaded sheet '{path}' as {format} ({count} new frames)");
                true
            }
            Err(err) => {
                log::warn!("SpriteFrameCache: failed to load sheet '{path}': {err}");
                false
            }
        }
    }
}

impl Default for SpriteFrameCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpriteFrameCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<_> = self.loaders.keys().copied().collect();
        formats.sort();
        f.debug_struct("SpriteFrameCache")
            .field("frames", &self.frames.len())
            .field("sheets", &self.sheets.len())
            .field("tracked_frames", &self.frame_to_sheet.len())
            .field("loader_formats", &formats)
            .finish()
    }
}
