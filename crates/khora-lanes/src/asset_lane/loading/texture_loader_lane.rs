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

//! Texture loading and management.

use crate::asset_lane::AssetLoaderLane;
use anyhow::{anyhow, Context, Result};
use khora_core::{
    asset::{AssetHandle, AssetUUID},
    math::Extent2D,
    renderer::{Texture2D, TextureProvider},
    vfs::FileSource,
};
use khora_data::assets::Assets;
use std::io::Cursor;
use std::sync::{Arc, RwLock};

/// A lane that reads texture descriptors from encoded image files.
///
/// Only the image header is decoded; pixel data stays with the renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureLoaderLane;

impl AssetLoaderLane<Texture2D> for TextureLoaderLane {
    fn load(
        &self,
        path: &str,
        bytes: &[u8],
    ) -> Result<Texture2D, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let (width, height) = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .context("Failed to guess image format")?
            .into_dimensions()
            .with_context(|| format!("Failed to read image header of '{path}'"))?;

        Ok(Texture2D::new(path, Extent2D::new(width, height)))
    }
}

/// A [`TextureProvider`] that creates each texture once per path.
///
/// Textures are keyed by [`AssetUUID::new_v5`] of their path, read through a
/// [`FileSource`] and decoded by a [`TextureLoaderLane`]. Textures created
/// elsewhere can be registered with [`insert`](Self::insert).
pub struct TextureLibrary {
    files: Arc<dyn FileSource>,
    lane: TextureLoaderLane,
    textures: RwLock<Assets<Texture2D>>,
}

impl TextureLibrary {
    /// Creates an empty library reading image files from `files`.
    pub fn new(files: Arc<dyn FileSource>) -> Self {
        Self {
            files,
            lane: TextureLoaderLane,
            textures: RwLock::new(Assets::new()),
        }
    }

    /// Returns the texture for `path`, reading its header on first use.
    pub fn load(&self, path: &str) -> Result<AssetHandle<Texture2D>> {
        if let Some(texture) = self.get(path) {
            return Ok(texture);
        }

        let bytes = self
            .files
            .read(path)
            .with_context(|| format!("Failed to read texture file '{path}'"))?;
        let texture = self.lane.load(path, &bytes).map_err(|e| anyhow!(e))?;

        let mut textures = self.textures.write().unwrap_or_else(|e| e.into_inner());
        textures.get_or_try_insert_with(AssetUUID::new_v5(path), || Ok(texture))
    }

    /// Registers a texture created elsewhere under its own path.
    ///
    /// Replaces any texture already known for that path.
    pub fn insert(&self, texture: Texture2D) -> AssetHandle<Texture2D> {
        let uuid = texture.uuid;
        let handle = AssetHandle::new(texture);
        let mut textures = self.textures.write().unwrap_or_else(|e| e.into_inner());
        textures.insert(uuid, handle.clone());
        handle
    }

    /// Returns the texture known for `path`, without touching the file source.
    pub fn get(&self, path: &str) -> Option<AssetHandle<Texture2D>> {
        let textures = self.textures.read().unwrap_or_else(|e| e.into_inner());
        textures.get(&AssetUUID::new_v5(path)).cloned()
    }

    /// Forgets the texture known for `path`. Holders keep their handles.
    pub fn remove(&self, path: &str) -> Option<AssetHandle<Texture2D>> {
        let mut textures = self.textures.write().unwrap_or_else(|e| e.into_inner());
        textures.remove(&AssetUUID::new_v5(path))
    }

    /// The number of textures known to the library.
    pub fn len(&self) -> usize {
        self.textures.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns `true` if the library knows no texture.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TextureProvider for TextureLibrary {
    fn texture_for_path(&self, path: &str) -> Option<AssetHandle<Texture2D>> {
        match self.load(path) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!("TextureLibrary: cannot create texture '{path}': {e:#}");
                None
            }
        }
    }
}
