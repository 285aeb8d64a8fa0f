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

//! Sprite sheet loading lanes.
//!
//! Each sheet format is a [`SheetParser`] turning a description into a
//! texture-free [`SheetDesc`]. [`SheetLoaderLane`] wraps a parser with file
//! access and texture resolution, and implements the cache's
//! [`SpriteSheetLoader`] contract for it.

mod json_parser;
mod plist_parser;
mod settings;

pub use json_parser::JsonSheetParser;
pub use plist_parser::PlistSheetParser;
pub use settings::SheetLoaderSettings;

use khora_core::{
    asset::{AssetHandle, SpriteFrame, SpriteSheetFormat},
    math::{Rect, Size2D, Vec2},
    renderer::{Texture2D, TextureProvider},
    vfs::{replace_extension, resolve_relative, FileSource},
};
use khora_data::assets::{SpriteFrameCache, SpriteSheetError, SpriteSheetLoader, SHEET_CONTENT_SHEET};
use std::sync::Arc;

/// One frame entry of a sheet description.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetFrameDesc {
    /// The name the frame is cached under.
    pub name: String,
    /// The region inside the texture, in pixels.
    pub rect: Rect,
    /// Whether the packer rotated the region by 90 degrees.
    pub rotated: bool,
    /// Offset of the trimmed region's centre from the untrimmed centre.
    pub offset: Vec2,
    /// The untrimmed size of the source image.
    pub original_size: Size2D,
    /// The anchor point requested by the sheet, if any.
    pub anchor_point: Option<Vec2>,
    /// Extra names registered for the same frame.
    pub aliases: Vec<String>,
}

/// A parsed sheet description, not yet bound to a texture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetDesc {
    /// The texture file named by the sheet, relative to the sheet.
    pub texture_file: Option<String>,
    /// Every frame entry, in document order.
    pub frames: Vec<SheetFrameDesc>,
}

/// Parses one sheet description format.
///
/// Parsing is all-or-nothing: an error anywhere in the document fails the
/// whole description.
pub trait SheetParser: Send + Sync {
    /// The format id this parser is registered under.
    fn format(&self) -> SpriteSheetFormat;

    /// Parses `content`. `origin` names the document in errors.
    fn parse(&self, origin: &str, content: &[u8]) -> Result<SheetDesc, SpriteSheetError>;
}

/// A [`SpriteSheetLoader`] driven by a [`SheetParser`].
///
/// Sheets are read through a [`FileSource`] and textures obtained from a
/// [`TextureProvider`]. The texture of a sheet is, in order of preference:
/// the texture passed by the caller, the texture path passed by the caller,
/// the texture file named by the sheet (relative to the sheet), or the sheet
/// path with its extension replaced by
/// [`SheetLoaderSettings::texture_extension`].
pub struct SheetLoaderLane<P> {
    parser: P,
    files: Arc<dyn FileSource>,
    textures: Arc<dyn TextureProvider>,
    settings: SheetLoaderSettings,
}

/// The built-in property-list loader.
pub type PlistSheetLoaderLane = SheetLoaderLane<PlistSheetParser>;

/// The built-in TexturePacker JSON loader.
pub type JsonSheetLoaderLane = SheetLoaderLane<JsonSheetParser>;

impl<P: SheetParser + Default> SheetLoaderLane<P> {
    /// Creates a lane with default settings.
    pub fn new(files: Arc<dyn FileSource>, textures: Arc<dyn TextureProvider>) -> Self {
        Self::with_settings(files, textures, SheetLoaderSettings::default())
    }

    /// Creates a lane with the given settings.
    pub fn with_settings(
        files: Arc<dyn FileSource>,
        textures: Arc<dyn TextureProvider>,
        settings: SheetLoaderSettings,
    ) -> Self {
        Self::from_parser(P::default(), files, textures, settings)
    }
}

impl<P: SheetParser> SheetLoaderLane<P> {
    /// Creates a lane around an already configured parser.
    pub fn from_parser(
        parser: P,
        files: Arc<dyn FileSource>,
        textures: Arc<dyn TextureProvider>,
        settings: SheetLoaderSettings,
    ) -> Self {
        Self {
            parser,
            files,
            textures,
            settings,
        }
    }

    /// The settings this lane was created with.
    pub fn settings(&self) -> &SheetLoaderSettings {
        &self.settings
    }

    fn read_sheet(&self, path: &str) -> Result<SheetDesc, SpriteSheetError> {
        let bytes = self.files.read(path).map_err(|source| SpriteSheetError::Io {
            path: path.to_string(),
            source,
        })?;
        self.parser.parse(path, &bytes)
    }

    fn texture_path(&self, sheet_path: &str, desc: &SheetDesc) -> String {
        match &desc.texture_file {
            Some(file) => resolve_relative(sheet_path, file),
            None => replace_extension(sheet_path, &self.settings.texture_extension),
        }
    }

    fn texture(&self, path: &str) -> Result<AssetHandle<Texture2D>, SpriteSheetError> {
        self.textures
            .texture_for_path(path)
            .ok_or_else(|| SpriteSheetError::TextureNotFound {
                path: path.to_string(),
            })
    }

    /// Builds frames on `texture` and hands them to the cache in one pass.
    fn register(
        &self,
        sheet_key: &str,
        desc: SheetDesc,
        texture: AssetHandle<Texture2D>,
        cache: &mut SpriteFrameCache,
        replace: bool,
    ) -> usize {
        let skip_existing = !replace && self.settings.skip_existing_frames;
        let mut frames = Vec::with_capacity(desc.frames.len());

        for entry in desc.frames {
            let names: Vec<String> = entry
                .aliases
                .into_iter()
                .chain(std::iter::once(entry.name))
                .filter(|name| {
                    let cached = skip_existing && cache.contains_frame(name);
                    if cached {
                        log::debug!("{sheet_key}: frame '{name}' is already cached, skipping it");
                    }
                    !cached
                })
                .collect();
            if names.is_empty() {
                continue;
            }

            let mut frame = SpriteFrame::new(
                texture.clone(),
                entry.rect,
                entry.rotated,
                entry.offset,
                entry.original_size,
            );
            if let Some(anchor) = entry.anchor_point {
                frame = frame.with_anchor_point(anchor);
            }

            for name in names {
                frames.push((name, AssetHandle::new(frame.clone())));
            }
        }

        let inserted = cache.insert_sheet_frames(sheet_key, self.parser.format(), frames);
        log::debug!("{sheet_key}: registered {inserted} frames");
        inserted
    }
}

impl<P: SheetParser> SpriteSheetLoader for SheetLoaderLane<P> {
    fn format(&self) -> SpriteSheetFormat {
        self.parser.format()
    }

    fn load(&self, path: &str, cache: &mut SpriteFrameCache) -> Result<usize, SpriteSheetError> {
        let desc = self.read_sheet(path)?;
        let texture = self.texture(&self.texture_path(path, &desc))?;
        Ok(self.register(path, desc, texture, cache, false))
    }

    fn load_with_texture(
        &self,
        path: &str,
        texture: AssetHandle<Texture2D>,
        cache: &mut SpriteFrameCache,
    ) -> Result<usize, SpriteSheetError> {
        let desc = self.read_sheet(path)?;
        Ok(self.register(path, desc, texture, cache, false))
    }

    fn load_with_texture_path(
        &self,
        path: &str,
        texture_path: &str,
        cache: &mut SpriteFrameCache,
    ) -> Result<usize, SpriteSheetError> {
        let desc = self.read_sheet(path)?;
        let texture = self.texture(texture_path)?;
        Ok(self.register(path, desc, texture, cache, false))
    }

    fn load_from_content(
        &self,
        content: &[u8],
        texture: AssetHandle<Texture2D>,
        cache: &mut SpriteFrameCache,
    ) -> Result<usize, SpriteSheetError> {
        let desc = self.parser.parse(SHEET_CONTENT_SHEET, content)?;
        Ok(self.register(SHEET_CONTENT_SHEET, desc, texture, cache, false))
    }

    fn reload(&self, path: &str, cache: &mut SpriteFrameCache) -> Result<usize, SpriteSheetError> {
        let desc = self.read_sheet(path)?;
        let texture = self.texture(&self.texture_path(path, &desc))?;
        Ok(self.register(path, desc, texture, cache, true))
    }

    fn frame_names(&self, content: &[u8]) -> Result<Vec<String>, SpriteSheetError> {
        let desc = self.parser.parse(SHEET_CONTENT_SHEET, content)?;
        Ok(desc.frames.into_iter().map(|frame| frame.name).collect())
    }
}

/// Registers the property-list and JSON loader lanes on `cache`.
///
/// Loaders already registered for those formats are kept.
pub fn register_builtin_sheet_loaders(
    cache: &mut SpriteFrameCache,
    files: Arc<dyn FileSource>,
    textures: Arc<dyn TextureProvider>,
) {
    cache.register_loader(Arc::new(PlistSheetLoaderLane::new(
        files.clone(),
        textures.clone(),
    )));
    cache.register_loader(Arc::new(JsonSheetLoaderLane::new(files, textures)));
}
