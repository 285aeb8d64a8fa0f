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

use super::{SpriteFrameCache, SpriteSheetError};
use khora_core::asset::{AssetHandle, SpriteSheetFormat};
use khora_core::renderer::Texture2D;

/// A format-specific parser that turns a sheet description into frames.
///
/// Loaders are registered on a [`SpriteFrameCache`] under the id returned by
/// [`format`](SpriteSheetLoader::format). The cache picks one by id and hands
/// itself over; the loader parses the description, resolves the texture and
/// registers every frame through [`SpriteFrameCache::insert_sheet_frames`].
///
/// Loaders keep no cache state between calls. A load that fails must leave
/// the cache exactly as it found it, so implementations parse the whole
/// description before registering anything.
///
/// Every method returns the number of frames registered.
pub trait SpriteSheetLoader: Send + Sync {
    /// The sheet format this loader understands.
    fn format(&self) -> SpriteSheetFormat;

    /// Loads the sheet at `path`, taking the texture named by the sheet itself.
    fn load(&self, path: &str, cache: &mut SpriteFrameCache) -> Result<usize, SpriteSheetError>;

    /// Loads the sheet at `path` onto an already created `texture`.
    fn load_with_texture(
        &self,
        path: &str,
        texture: AssetHandle<Texture2D>,
        cache: &mut SpriteFrameCache,
    ) -> Result<usize, SpriteSheetError>;

    /// Loads the sheet at `path` onto the texture found at `texture_path`.
    fn load_with_texture_path(
        &self,
        path: &str,
        texture_path: &str,
        cache: &mut SpriteFrameCache,
    ) -> Result<usize, SpriteSheetError>;

    /// Loads a sheet description held in memory onto `texture`.
    fn load_from_content(
        &self,
        content: &[u8],
        texture: AssetHandle<Texture2D>,
        cache: &mut SpriteFrameCache,
    ) -> Result<usize, SpriteSheetError>;

    /// Parses the sheet at `path` again after the cache dropped its frames.
    ///
    /// Unlike `load`, this replaces any frame that shares a name with the sheet.
    fn reload(&self, path: &str, cache: &mut SpriteFrameCache) -> Result<usize, SpriteSheetError>;

    /// Lists the frame names declared by a sheet description, without loading it.
    fn frame_names(&self, _content: &[u8]) -> Result<Vec<String>, SpriteSheetError> {
        Err(SpriteSheetError::Unsupported("listing frame names"))
    }
}
