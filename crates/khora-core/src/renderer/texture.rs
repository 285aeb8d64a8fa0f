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

//! Defines the texture descriptor shared by sprite frames.

use crate::asset::{Asset, AssetHandle, AssetUUID};
use crate::math::Extent2D;

/// A texture as seen by the 2D asset layer.
///
/// This is a descriptor only: pixel data and GPU residency belong to the
/// rendering backend. Two frames refer to the same texture when their
/// [`AssetHandle`]s point at the same allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture2D {
    /// Stable identifier derived from the source path.
    pub uuid: AssetUUID,
    /// The path the texture was created from.
    pub path: String,
    /// The size of the texture in pixels.
    pub size: Extent2D,
}

impl Texture2D {
    /// Creates a texture descriptor for `path`.
    pub fn new(path: impl Into<String>, size: Extent2D) -> Self {
        let path = path.into();
        Self {
            uuid: AssetUUID::new_v5(&path),
            path,
            size,
        }
    }
}

impl Asset for Texture2D {}

/// Constructs or looks up textures by path.
///
/// Sprite sheet loaders use this to turn the texture name found in a sheet
/// description into a shared texture. Implementations are expected to return
/// the same handle for the same path while the texture is alive.
pub trait TextureProvider: Send + Sync {
    /// Returns the texture for `path`, creating it if needed.
    ///
    /// Returns `None` if no texture can be produced for that path.
    fn texture_for_path(&self, path: &str) -> Option<AssetHandle<Texture2D>>;
}
