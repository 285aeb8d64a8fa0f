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

//! The sprite frame cache and its loader contract.
//!
//! A [`SpriteFrameCache`] de-duplicates sprite frames by name and remembers
//! which sheet each one came from, so a single sheet can be dropped or
//! reloaded without disturbing the others. Format-specific parsing is
//! delegated to [`SpriteSheetLoader`] implementations registered by format id;
//! the engine's built-in loaders live in `khora-lanes`.

mod cache;
mod error;
mod loader;
mod retainer;
mod settings;
mod sheet;

pub use cache::SpriteFrameCache;
pub use error::SpriteSheetError;
pub use loader::SpriteSheetLoader;
pub use retainer::SpriteFrameRetainer;
pub use settings::SpriteFrameCacheSettings;
pub use sheet::{SpriteSheet, ADD_FRAME_SHEET, SHEET_CONTENT_SHEET};
