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

//! Provides structs for representing sizes in 2D.
//!
//! [`Extent2D`] uses integer components and describes whole-texture pixel
//! dimensions. [`Size2D`] uses `f32` components and describes sprite regions,
//! which may carry fractional values after trimming.

use super::parse_braced;
use serde::{Deserialize, Serialize};

/// A two-dimensional extent, typically representing width and height.
///
/// This is commonly used for texture dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new `Extent2D`.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A two-dimensional size with `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size2D {
    /// The width component of the size.
    pub width: f32,
    /// The height component of the size.
    pub height: f32,
}

impl Size2D {
    /// A size of zero width and height.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new `Size2D`.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Parses the `"{w,h}"` form used by property-list sprite sheets.
    pub fn parse_braced(text: &str) -> Option<Self> {
        parse_braced::<2>(text).map(|[width, height]| Self::new(width, height))
    }

    /// Returns a copy with both components made non-negative.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.width.abs(), self.height.abs())
    }
}

impl From<Extent2D> for Size2D {
    fn from(extent: Extent2D) -> Self {
        Self::new(extent.width as f32, extent.height as f32)
    }
}
