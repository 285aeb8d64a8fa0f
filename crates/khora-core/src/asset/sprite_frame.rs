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

//! Defines the sprite frame, the unit of lookup for 2D renderers.

use super::{Asset, AssetHandle};
use crate::math::{Rect, Size2D, Vec2};
use crate::renderer::Texture2D;

/// A named rectangular region of a texture, plus the metadata needed to undo
/// the packing applied by the atlas tool.
///
/// A frame keeps its texture alive for as long as it exists. Frames are
/// immutable once built; caches share them through [`AssetHandle`].
#[derive(Debug, Clone)]
pub struct SpriteFrame {
    texture: AssetHandle<Texture2D>,
    rect: Rect,
    rotated: bool,
    offset: Vec2,
    original_size: Size2D,
    anchor_point: Option<Vec2>,
    cap_insets: Option<Rect>,
}

impl SpriteFrame {
    /// Creates a frame for a packed region of `texture`.
    ///
    /// # Arguments
    /// * `rect` - The region inside the texture, in pixels.
    /// * `rotated` - Whether the packer rotated the region by 90 degrees.
    /// * `offset` - Offset of the trimmed region's centre from the untrimmed centre.
    /// * `original_size` - The untrimmed size of the source image.
    pub fn new(
        texture: AssetHandle<Texture2D>,
        rect: Rect,
        rotated: bool,
        offset: Vec2,
        original_size: Size2D,
    ) -> Self {
        Self {
            texture,
            rect,
            rotated,
            offset,
            original_size,
            anchor_point: None,
            cap_insets: None,
        }
    }

    /// Creates a frame that covers the whole texture.
    pub fn from_texture(texture: AssetHandle<Texture2D>) -> Self {
        let size = Size2D::from(texture.size);
        Self::new(
            texture,
            Rect::new(0.0, 0.0, size.width, size.height),
            false,
            Vec2::ZERO,
            size,
        )
    }

    /// Sets the anchor point the sheet requested for this frame.
    pub fn with_anchor_point(mut self, anchor_point: Vec2) -> Self {
        self.anchor_point = Some(anchor_point);
        self
    }

    /// Sets the 9-slice cap insets for this frame.
    pub fn with_cap_insets(mut self, cap_insets: Rect) -> Self {
        self.cap_insets = Some(cap_insets);
        self
    }

    /// The texture this frame samples from.
    pub fn texture(&self) -> &AssetHandle<Texture2D> {
        &self.texture
    }

    /// The region inside the texture, in pixels.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether the region is stored rotated by 90 degrees.
    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    /// Offset of the trimmed region's centre from the untrimmed centre.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// The untrimmed size of the source image.
    pub fn original_size(&self) -> Size2D {
        self.original_size
    }

    /// The anchor point requested by the sheet, if any.
    pub fn anchor_point(&self) -> Option<Vec2> {
        self.anchor_point
    }

    /// The 9-slice cap insets, if any.
    pub fn cap_insets(&self) -> Option<Rect> {
        self.cap_insets
    }

    /// Returns `true` if this frame samples from `texture`.
    pub fn uses_texture(&self, texture: &AssetHandle<Texture2D>) -> bool {
        self.texture.ptr_eq(texture)
    }
}

impl Asset for SpriteFrame {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Extent2D;

    fn texture(path: &str) -> AssetHandle<Texture2D> {
        AssetHandle::new(Texture2D::new(path, Extent2D::new(128, 64)))
    }

    #[test]
    fn test_from_texture_covers_whole_texture() {
        let frame = SpriteFrame::from_texture(texture("hero.png"));
        assert_eq!(frame.rect(), Rect::new(0.0, 0.0, 128.0, 64.0));
        assert_eq!(frame.original_size(), Size2D::new(128.0, 64.0));
        assert!(!frame.is_rotated());
        assert!(frame.anchor_point().is_none());
    }

    #[test]
    fn test_frame_keeps_texture_alive() {
        let tex = texture("hero.png");
        let frame = SpriteFrame::from_texture(tex.clone());
        assert_eq!(tex.strong_count(), 2);
        assert!(frame.uses_texture(&tex));

        drop(frame);
        assert_eq!(tex.strong_count(), 1);
    }

    #[test]
    fn test_builder_metadata() {
        let frame = SpriteFrame::new(
            texture("ui.png"),
            Rect::new(2.0, 2.0, 10.0, 12.0),
            true,
            Vec2::new(1.0, -1.0),
            Size2D::new(14.0, 14.0),
        )
        .with_anchor_point(Vec2::new(0.5, 0.0))
        .with_cap_insets(Rect::new(3.0, 3.0, 4.0, 6.0));

        assert!(frame.is_rotated());
        assert_eq!(frame.anchor_point(), Some(Vec2::new(0.5, 0.0)));
        assert_eq!(frame.cap_insets(), Some(Rect::new(3.0, 3.0, 4.0, 6.0)));
        assert!(!frame.uses_texture(&texture("ui.png")));
    }
}
