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

//! Provides the axis-aligned rectangle used for sprite regions.

use super::{parse_braced, Size2D, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle defined by its origin and size.
///
/// Sprite sheets address sub-images with this type. The origin is the
/// top-left corner in texture pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// The top-left corner of the rectangle.
    pub origin: Vec2,
    /// The width and height of the rectangle.
    pub size: Size2D,
}

impl Rect {
    /// Creates a new `Rect` from its components.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Size2D::new(width, height),
        }
    }

    /// Parses the `"{{x,y},{w,h}}"` form used by property-list sprite sheets.
    pub fn parse_braced(text: &str) -> Option<Self> {
        parse_braced::<4>(text).map(|[x, y, w, h]| Self::new(x, y, w, h))
    }
}
