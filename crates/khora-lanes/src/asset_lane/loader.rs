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

use khora_core::asset::Asset;
use std::error::Error;

/// A trait for lanes that turn the bytes of a file into an asset `A`.
///
/// This is the CPU-side decoding step of asset loading. Reading the bytes and
/// caching the result belong to the caller.
pub trait AssetLoaderLane<A: Asset> {
    /// Decodes `bytes`, read from `path`, into an instance of `A`.
    ///
    /// # Returns
    /// The decoded asset, or a boxed error that is safe to send between threads.
    fn load(&self, path: &str, bytes: &[u8]) -> Result<A, Box<dyn Error + Send + Sync>>;
}
