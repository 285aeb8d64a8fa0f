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

//! Defines the errors a sprite sheet loader can report.
//!
//! These never cross the [`SpriteFrameCache`](super::SpriteFrameCache)
//! boundary: the cache logs them and answers with its usual sentinel values.

use thiserror::Error;

/// An error raised while reading or parsing a sprite sheet.
#[derive(Debug, Error)]
pub enum SpriteSheetError {
    /// The sheet or one of its companion files could not be read.
    #[error("failed to read '{path}'")]
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The sheet description is not well-formed.
    #[error("failed to parse sheet '{path}': {details}")]
    Parse {
        /// The sheet path, or a synthetic key for in-memory content.
        path: String,
        /// What the parser rejected.
        details: String,
    },
    /// A frame entry lacks a field its format requires.
    #[error("frame '{frame}' is missing required field '{field}'")]
    MissingField {
        /// The name of the offending frame.
        frame: String,
        /// The missing key.
        field: &'static str,
    },
    /// A frame entry has a field whose value cannot be interpreted.
    #[error("frame '{frame}' has an invalid '{field}' value: {value}")]
    InvalidValue {
        /// The name of the offending frame.
        frame: String,
        /// The rejected key.
        field: &'static str,
        /// The rejected value, as text.
        value: String,
    },
    /// The sheet declares a layout version this loader does not know.
    #[error("sheet '{path}' uses unsupported format version {version}")]
    UnsupportedVersion {
        /// The sheet path.
        path: String,
        /// The declared version.
        version: i64,
    },
    /// The texture provider could not produce the sheet's texture.
    #[error("no texture could be created for '{path}'")]
    TextureNotFound {
        /// The texture path that was requested.
        path: String,
    },
    /// The loader does not implement the requested operation.
    #[error("operation not supported by this loader: {0}")]
    Unsupported(&'static str),
}
