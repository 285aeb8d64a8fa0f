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

//! Virtual File System (VFS) module for reading asset bytes by path.
//!
//! Loaders never touch the platform file system directly. They go through a
//! [`FileSource`], which maps a forward-slash asset path to its bytes. Two
//! sources are provided: [`NativeFileSource`], rooted at a directory on disk,
//! and [`MemoryFileSource`], which serves content registered at runtime.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Reads file contents by path into memory.
///
/// Paths are asset paths: forward-slash separated and relative to whatever
/// root the implementation chooses.
pub trait FileSource: Send + Sync {
    /// Reads the whole file at `path`.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Returns `true` if a file exists at `path`.
    fn exists(&self, path: &str) -> bool;
}

/// A [`FileSource`] backed by the native file system under a root directory.
#[derive(Debug, Clone)]
pub struct NativeFileSource {
    root: PathBuf,
}

impl NativeFileSource {
    /// Creates a source that resolves asset paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory asset paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl FileSource for NativeFileSource {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.full_path(path))
    }

    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_file()
    }
}

/// A [`FileSource`] serving content registered in memory.
///
/// Useful for embedded assets and for tests.
#[derive(Debug, Default)]
pub struct MemoryFileSource {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryFileSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the content served for `path`.
    pub fn insert(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files.insert(path.into(), bytes.into());
    }

    /// Forgets the content served for `path`. Returns `true` if it existed.
    pub fn remove(&self, path: &str) -> bool {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files.remove(path).is_some()
    }
}

impl FileSource for MemoryFileSource {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{path}' is not registered in the memory file source"),
            )
        })
    }

    fn exists(&self, path: &str) -> bool {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.contains_key(path)
    }
}

/// Resolves `relative` against the directory containing `base_file`.
///
/// `resolve_relative("ui/atlas.plist", "atlas.png")` is `"ui/atlas.png"`.
/// An absolute `relative` path is returned unchanged.
pub fn resolve_relative(base_file: &str, relative: &str) -> String {
    if relative.starts_with('/') {
        return relative.to_string();
    }
    match base_file.rfind('/') {
        Some(index) => format!("{}/{}", &base_file[..index], relative),
        None => relative.to_string(),
    }
}

/// Replaces the extension of the file name in `path` with `extension`.
///
/// A path without an extension gets one appended.
pub fn replace_extension(path: &str, extension: &str) -> String {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    let stem_end = match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => file_start + dot,
        _ => path.len(),
    };
    format!("{}.{}", &path[..stem_end], extension)
}
