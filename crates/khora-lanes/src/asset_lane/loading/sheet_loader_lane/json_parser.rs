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

//! TexturePacker JSON sheets, in both the hash and the array layouts.

use super::{SheetDesc, SheetFrameDesc, SheetParser};
use khora_core::asset::SpriteSheetFormat;
use khora_core::math::{Rect, Size2D, Vec2};
use khora_data::assets::SpriteSheetError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Parser for TexturePacker JSON sheets.
///
/// Hash-layout frames are returned sorted by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSheetParser;

#[derive(Deserialize)]
struct JsonSheet {
    frames: JsonFrames,
    #[serde(default)]
    meta: JsonMeta,
}

#[derive(Deserialize, Default)]
struct JsonMeta {
    image: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonFrames {
    Hash(BTreeMap<String, JsonFrame>),
    Array(Vec<NamedJsonFrame>),
}

#[derive(Deserialize)]
struct NamedJsonFrame {
    filename: String,
    #[serde(flatten)]
    frame: JsonFrame,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonFrame {
    frame: JsonRect,
    #[serde(default)]
    rotated: bool,
    sprite_source_size: Option<JsonRect>,
    source_size: Option<JsonSize>,
    pivot: Option<JsonPoint>,
}

#[derive(Deserialize, Clone, Copy)]
struct JsonRect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

#[derive(Deserialize, Clone, Copy)]
struct JsonSize {
    w: f32,
    h: f32,
}

#[derive(Deserialize, Clone, Copy)]
struct JsonPoint {
    x: f32,
    y: f32,
}

impl JsonFrame {
    fn into_desc(self, name: String) -> SheetFrameDesc {
        let frame = self.frame;
        let source = self.source_size.unwrap_or(JsonSize {
            w: frame.w,
            h: frame.h,
        });
        let trimmed = self.sprite_source_size.unwrap_or(JsonRect {
            x: 0.0,
            y: 0.0,
            w: frame.w,
            h: frame.h,
        });

        // Centre of the trimmed region relative to the untrimmed centre, y up.
        let offset = Vec2::new(
            trimmed.x + trimmed.w / 2.0 - source.w / 2.0,
            source.h / 2.0 - (trimmed.y + trimmed.h / 2.0),
        );

        SheetFrameDesc {
            name,
            rect: Rect::new(frame.x, frame.y, frame.w, frame.h),
            rotated: self.rotated,
            offset,
            original_size: Size2D::new(source.w, source.h),
            anchor_point: self.pivot.map(|pivot| Vec2::new(pivot.x, pivot.y)),
            aliases: Vec::new(),
        }
    }
}

impl SheetParser for JsonSheetParser {
    fn format(&self) -> SpriteSheetFormat {
        SpriteSheetFormat::JSON
    }

    fn parse(&self, origin: &str, content: &[u8]) -> Result<SheetDesc, SpriteSheetError> {
        let sheet: JsonSheet =
            serde_json::from_slice(content).map_err(|e| SpriteSheetError::Parse {
                path: origin.to_string(),
                details: e.to_string(),
            })?;

        let frames = match sheet.frames {
            JsonFrames::Hash(frames) => frames
                .into_iter()
                .map(|(name, frame)| frame.into_desc(name))
                .collect(),
            JsonFrames::Array(frames) => frames
                .into_iter()
                .map(|named| named.frame.into_desc(named.filename))
                .collect(),
        };

        Ok(SheetDesc {
            texture_file: sheet.meta.image.filter(|image| !image.is_empty()),
            frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_layout() {
        // SETUP
        let json = br#"{
            "frames": {
                "walk_1.png": {
                    "frame": {"x": 10, "y": 20, "w": 30, "h": 40},
                    "rotated": true,
                    "trimmed": true,
                    "spriteSourceSize": {"x": 4, "y": 2, "w": 30, "h": 40},
                    "sourceSize": {"w": 40, "h": 50},
                    "pivot": {"x": 0.5, "y": 0.25}
                },
                "idle.png": {
                    "frame": {"x": 0, "y": 0, "w": 8, "h": 8}
                }
            },
            "meta": {"image": "hero.png", "size": {"w": 64, "h": 64}}
        }"#;

        // ACTION
        let desc = JsonSheetParser.parse("hero.json", json).unwrap();

        // ASSERT
        assert_eq!(desc.texture_file.as_deref(), Some("hero.png"));
        let names: Vec<_> = desc.frames.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["idle.png", "walk_1.png"]);

        let idle = &desc.frames[0];
        assert_eq!(idle.offset, Vec2::ZERO);
        assert_eq!(idle.original_size, Size2D::new(8.0, 8.0));

        let walk = &desc.frames[1];
        assert!(walk.rotated);
        assert_eq!(walk.rect, Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(walk.original_size, Size2D::new(40.0, 50.0));
        assert!(walk.offset.approx_eq(Vec2::new(-1.0, 3.0)));
        assert_eq!(walk.anchor_point, Some(Vec2::new(0.5, 0.25)));
    }

    #[test]
    fn test_array_layout() {
        let json = br#"{
            "frames": [
                {"filename": "b.png", "frame": {"x": 8, "y": 0, "w": 8, "h": 8}},
                {"filename": "a.png", "frame": {"x": 0, "y": 0, "w": 8, "h": 8}}
            ]
        }"#;

        let desc = JsonSheetParser.parse("ui.json", json).unwrap();

        assert_eq!(desc.texture_file, None);
        let names: Vec<_> = desc.frames.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "a.png"]);
    }

    #[test]
    fn test_missing_frame_rect_is_a_parse_error() {
        let json = br#"{"frames": {"a.png": {"rotated": false}}}"#;
        let err = JsonSheetParser.parse("ui.json", json).unwrap_err();
        assert!(matches!(err, SpriteSheetError::Parse { ref path, .. } if path == "ui.json"));
    }
}
