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

//! Provides the backend-agnostic texture contracts used by 2D asset caches.
//!
//! This module defines the 'what' of a texture as seen by sprite sheets: an
//! identity, a source path and a pixel size. Creating GPU resources for it is
//! the job of a concrete backend, which plugs in through [`TextureProvider`].

pub mod texture;

pub use self::texture::{Texture2D, TextureProvider};
