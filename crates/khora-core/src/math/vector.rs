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

use super::{parse_braced, EPSILON};
use serde::{Deserialize, Serialize};

/// A 2-dimensional vector with `f32` components.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
}

impl Vec2 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new `Vec2` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Parses the `"{x,y}"` form used by property-list sprite sheets.
    pub fn parse_braced(text: &str) -> Option<Self> {
        parse_braced::<2>(text).map(|[x, y]| Self::new(x, y))
    }

    /// Returns `true` if both components are within [`EPSILON`] of `other`.
    #[inline]
    pub fn approx_eq(&self, other: Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_parse_braced() {
        assert_eq!(Vec2::parse_braced("{3,-4.5}"), Some(Vec2::new(3.0, -4.5)));
        assert_eq!(Vec2::parse_braced("{ 0 , 0 }"), Some(Vec2::ZERO));
        assert_eq!(Vec2::parse_braced("{1}"), None);
    }

    #[test]
    fn test_vec2_approx_eq() {
        assert!(Vec2::new(0.5, 1.0).approx_eq(Vec2::new(0.5 + EPSILON / 2.0, 1.0)));
        assert!(!Vec2::new(0.5, 1.0).approx_eq(Vec2::new(0.6, 1.0)));
    }
}
