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

//! A generic, type-safe storage for loaded asset handles.

use khora_core::asset::{Asset, AssetHandle, AssetUUID};
use std::collections::HashMap;

/// An in-memory store for one type of asset `A`, keyed by [`AssetUUID`].
///
/// Each asset is stored once; lookups hand out clones of the stored handle.
/// Removing an entry only drops the store's own handle, so holders elsewhere
/// keep the asset alive.
#[derive(Debug)]
pub struct Assets<A: Asset> {
    storage: HashMap<AssetUUID, AssetHandle<A>>,
}

impl<A: Asset> Default for Assets<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Asset> Clone for Assets<A> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<A: Asset> Assets<A> {
    /// Creates a new, empty asset storage.
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Stores `handle` under `uuid`, returning the handle it replaced.
    pub fn insert(&mut self, uuid: AssetUUID, handle: AssetHandle<A>) -> Option<AssetHandle<A>> {
        self.storage.insert(uuid, handle)
    }

    /// Retrieves a reference to the handle stored under `uuid`.
    pub fn get(&self, uuid: &AssetUUID) -> Option<&AssetHandle<A>> {
        self.storage.get(uuid)
    }

    /// Returns the handle stored under `uuid`, creating it with `create` on a miss.
    ///
    /// `create` may fail, in which case nothing is stored.
    pub fn get_or_try_insert_with<E, F>(&mut self, uuid: AssetUUID, create: F) -> Result<AssetHandle<A>, E>
    where
        F: FnOnce() -> Result<A, E>,
    {
        if let Some(handle) = self.storage.get(&uuid) {
            return Ok(handle.clone());
        }
        let handle = AssetHandle::new(create()?);
        self.storage.insert(uuid, handle.clone());
        Ok(handle)
    }

    /// Removes the handle stored under `uuid`.
    pub fn remove(&mut self, uuid: &AssetUUID) -> Option<AssetHandle<A>> {
        self.storage.remove(uuid)
    }

    /// Checks if an asset with the specified UUID exists in the storage.
    pub fn contains(&self, uuid: &AssetUUID) -> bool {
        self.storage.contains_key(uuid)
    }

    /// The number of stored assets.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterates over every stored handle and its UUID.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetUUID, &AssetHandle<A>)> {
        self.storage.iter()
    }
}
