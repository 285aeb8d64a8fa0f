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

//! Provides the 2D mathematics primitives used to describe sprite regions.
//!
//! Everything here is expressed in texture pixels with `f32` components.
//! Sheet descriptions often encode these values as brace-delimited strings
//! (`"{x,y}"`, `"{{x,y},{w,h}}"`), so each type also knows how to parse that form.

pub mod dimension;
pub mod geometry;
pub mod vector;

pub use self::dimension::*;
pub use self::geometry::*;
pub use self::vector::*;

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

/// Parses a brace-delimited list of exactly `N` numbers.
///
/// Braces and whitespace are ignored, so `"{{1, 2}, {3, 4}}"` and `"1,2,3,4"`
/// both yield `[1.0, 2.0, 3.0, 4.0]` for `N = 4`.
pub(crate) fn parse_braced<const N: usize>(text: &str) -> Option<[f32; N]> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '{' | '}') && !c.is_whitespace())
        .collect();

    let mut values = [0.0f32; N];
    let mut parts = cleaned.split(',');
    for slot in values.iter_mut() {
        *slot = parts.next()?.parse().ok()?;
    }

    if parts.next().is_some() {
        return None;
    }
    Some(values)
}
