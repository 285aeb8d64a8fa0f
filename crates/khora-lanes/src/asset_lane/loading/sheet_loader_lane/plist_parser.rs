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

//! Property-list sprite sheets (XML or binary).
//!
//! The root dictionary holds a `frames` dictionary keyed by frame name and an
//! optional `metadata` dictionary with the layout `format` (0 to 3) and the
//! `textureFileName`. Sheets without metadata use layout 0.

use super::{SheetDesc, SheetFrameDesc, SheetParser};
use khora_core::asset::SpriteSheetFormat;
use khora_core::math::{Rect, Size2D, Vec2};
use khora_data::assets::SpriteSheetError;
use plist::{Dictionary, Value};
use std::io::Cursor;

/// Parser for property-list sprite sheets.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlistSheetParser;

impl SheetParser for PlistSheetParser {
    fn format(&self) -> SpriteSheetFormat {
        SpriteSheetFormat::PLIST
    }

    fn parse(&self, origin: &str, content: &[u8]) -> Result<SheetDesc, SpriteSheetError> {
        let root = Value::from_reader(Cursor::new(content)).map_err(|e| SpriteSheetError::Parse {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        let root = root
            .as_dictionary()
            .ok_or_else(|| parse_error(origin, "the root element is not a dictionary"))?;

        let (version, texture_file) = match root.get("metadata").and_then(Value::as_dictionary) {
            Some(metadata) => (
                metadata.get("format").and_then(integer).unwrap_or(0),
                metadata
                    .get("textureFileName")
                    .and_then(Value::as_string)
                    .filter(|file| !file.is_empty())
                    .map(str::to_string),
            ),
            None => (0, None),
        };
        if !(0..=3).contains(&version) {
            return Err(SpriteSheetError::UnsupportedVersion {
                path: origin.to_string(),
                version,
            });
        }

        let frames = root
            .get("frames")
            .and_then(Value::as_dictionary)
            .ok_or_else(|| parse_error(origin, "missing 'frames' dictionary"))?;

        let mut descs = Vec::with_capacity(frames.len());
        for (name, value) in frames {
            let dict = value
                .as_dictionary()
                .ok_or_else(|| SpriteSheetError::InvalidValue {
                    frame: name.clone(),
                    field: "frames",
                    value: "not a dictionary".to_string(),
                })?;
            let entry = FrameEntry { name, dict };

            let mut desc = match version {
                0 => entry.layout_0()?,
                1 | 2 => entry.layout_1_2(version == 2)?,
                _ => entry.layout_3()?,
            };
            desc.anchor_point = entry.optional_point("anchor")?;
            descs.push(desc);
        }

        Ok(SheetDesc {
            texture_file,
            frames: descs,
        })
    }
}

fn parse_error(origin: &str, details: &str) -> SpriteSheetError {
    SpriteSheetError::Parse {
        path: origin.to_string(),
        details: details.to_string(),
    }
}

fn integer(value: &Value) -> Option<i64> {
    value
        .as_signed_integer()
        .or_else(|| value.as_real().map(|real| real as i64))
}

/// Typed access to the fields of one frame dictionary.
struct FrameEntry<'a> {
    name: &'a str,
    dict: &'a Dictionary,
}

impl<'a> FrameEntry<'a> {
    fn field(&self, field: &'static str) -> Result<&'a Value, SpriteSheetError> {
        self.dict.get(field).ok_or_else(|| SpriteSheetError::MissingField {
            frame: self.name.to_string(),
            field,
        })
    }

    fn invalid(&self, field: &'static str, value: &Value) -> SpriteSheetError {
        SpriteSheetError::InvalidValue {
            frame: self.name.to_string(),
            field,
            value: format!("{value:?}"),
        }
    }

    fn number(&self, field: &'static str) -> Result<f32, SpriteSheetError> {
        let value = self.field(field)?;
        value
            .as_real()
            .or_else(|| value.as_signed_integer().map(|int| int as f64))
            .map(|number| number as f32)
            .ok_or_else(|| self.invalid(field, value))
    }

    fn braced<T>(
        &self,
        field: &'static str,
        parse: fn(&str) -> Option<T>,
    ) -> Result<T, SpriteSheetError> {
        let value = self.field(field)?;
        value
            .as_string()
            .and_then(parse)
            .ok_or_else(|| self.invalid(field, value))
    }

    fn optional_point(&self, field: &'static str) -> Result<Option<Vec2>, SpriteSheetError> {
        match self.dict.get(field) {
            Some(_) => self.braced(field, Vec2::parse_braced).map(Some),
            None => Ok(None),
        }
    }

    fn optional_bool(&self, field: &'static str) -> Result<bool, SpriteSheetError> {
        match self.dict.get(field) {
            Some(value) => value.as_boolean().ok_or_else(|| self.invalid(field, value)),
            None => Ok(false),
        }
    }

    fn aliases(&self) -> Result<Vec<String>, SpriteSheetError> {
        let Some(value) = self.dict.get("aliases") else {
            return Ok(Vec::new());
        };
        let array = value
            .as_array()
            .ok_or_else(|| self.invalid("aliases", value))?;
        array
            .iter()
            .map(|alias| {
                alias
                    .as_string()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid("aliases", alias))
            })
            .collect()
    }

    fn desc(&self, rect: Rect, rotated: bool, offset: Vec2, original_size: Size2D) -> SheetFrameDesc {
        SheetFrameDesc {
            name: self.name.to_string(),
            rect,
            rotated,
            offset,
            original_size,
            anchor_point: None,
            aliases: Vec::new(),
        }
    }

    /// Plain numeric keys.
    fn layout_0(&self) -> Result<SheetFrameDesc, SpriteSheetError> {
        let rect = Rect::new(
            self.number("x")?,
            self.number("y")?,
            self.number("width")?,
            self.number("height")?,
        );
        let offset = Vec2::new(self.number("offsetX")?, self.number("offsetY")?);
        let original_size =
            Size2D::new(self.number("originalWidth")?, self.number("originalHeight")?).abs();
        Ok(self.desc(rect, false, offset, original_size))
    }

    /// Braced strings; layout 2 adds the rotation flag.
    fn layout_1_2(&self, with_rotation: bool) -> Result<SheetFrameDesc, SpriteSheetError> {
        let rect = self.braced("frame", Rect::parse_braced)?;
        let rotated = with_rotation && self.optional_bool("rotated")?;
        let offset = self.braced("offset", Vec2::parse_braced)?;
        let original_size = self.braced("sourceSize", Size2D::parse_braced)?;
        Ok(self.desc(rect, rotated, offset, original_size))
    }

    /// Sprite-prefixed keys with aliases.
    fn layout_3(&self) -> Result<SheetFrameDesc, SpriteSheetError> {
        let sprite_size = self.braced("spriteSize", Size2D::parse_braced)?;
        let sprite_offset = self.braced("spriteOffset", Vec2::parse_braced)?;
        let source_size = self.braced("spriteSourceSize", Size2D::parse_braced)?;
        let texture_rect = self.braced("textureRect", Rect::parse_braced)?;
        let rotated = self.optional_bool("textureRotated")?;

        let rect = Rect {
            origin: texture_rect.origin,
            size: sprite_size,
        };
        let mut desc = self.desc(rect, rotated, sprite_offset, source_size);
        desc.aliases = self.aliases()?;
        Ok(desc)
    }
}
