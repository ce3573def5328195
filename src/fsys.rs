// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Memoized filesystem view shared by both hooks
//!
//! Module resolution re-stats the same paths constantly (every relative
//! specifier probes its equivalence candidates, and the load hook re-reads
//! compiled output). `FsCache` memoizes stat and read results per path so a
//! hook call costs at most one syscall per distinct path for the life of
//! the cache.

use dashmap::DashMap;
use std::path::{Path, PathBuf};

/// Thread-safe memoizing wrapper over existence checks and file reads
#[derive(Debug, Default)]
pub struct FsCache {
    /// Memoized stat results
    exists: DashMap<PathBuf, bool>,
    /// Memoized file contents; unreadable files memoize as `None`
    contents: DashMap<PathBuf, Option<String>>,
}

impl FsCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `path` exists as a file, memoized
    pub fn file_exists(&self, path: &Path) -> bool {
        if let Some(hit) = self.exists.get(path) {
            return *hit;
        }
        let found = path.is_file();
        self.exists.insert(path.to_path_buf(), found);
        found
    }

    /// Read `path` to a string, memoized. Returns `None` for missing or
    /// unreadable files.
    pub fn read(&self, path: &Path) -> Option<String> {
        if let Some(hit) = self.contents.get(path) {
            return hit.clone();
        }
        let text = std::fs::read_to_string(path).ok();
        self.contents.insert(path.to_path_buf(), text.clone());
        text
    }

    /// Forget memoized results for one path. Embedders that rewrite
    /// compiled output mid-process call this before re-loading.
    pub fn invalidate(&self, path: &Path) {
        self.exists.remove(path);
        self.contents.remove(path);
    }

    /// Drop all memoized results
    pub fn clear(&self) {
        self.exists.clear();
        self.contents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_exists_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.ts");
        fs::write(&file, "const x: number = 1;").unwrap();

        let fsys = FsCache::new();
        assert!(fsys.file_exists(&file));
        assert!(!fsys.file_exists(&dir.path().join("missing.ts")));
        assert_eq!(fsys.read(&file).unwrap(), "const x: number = 1;");
        assert_eq!(fsys.read(&dir.path().join("missing.ts")), None);
    }

    #[test]
    fn test_results_are_memoized() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.ts");
        fs::write(&file, "one").unwrap();

        let fsys = FsCache::new();
        assert_eq!(fsys.read(&file).unwrap(), "one");

        // The cache keeps serving the memoized contents after a rewrite.
        fs::write(&file, "two").unwrap();
        assert_eq!(fsys.read(&file).unwrap(), "one");

        fsys.invalidate(&file);
        assert_eq!(fsys.read(&file).unwrap(), "two");
    }

    #[test]
    fn test_directories_are_not_files() {
        let dir = tempdir().unwrap();
        let fsys = FsCache::new();
        assert!(!fsys.file_exists(dir.path()));
    }
}
