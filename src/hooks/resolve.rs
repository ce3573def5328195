// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Resolution interceptor
//!
//! Wraps the host's specifier resolution. When a relative request points at
//! a file that does not exist but an equivalence candidate does, the
//! request is rewritten to that candidate before delegating; everything
//! else passes through untouched. This must run *before* loading: the
//! host's own resolution fails on a specifier that names a nonexistent
//! output file, even on hosts whose load path could handle it.

use crate::error::Result;
use crate::fsys::FsCache;
use crate::services::{EquivalenceOracle, Resolver};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// One resolution request, transient per call
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// The module specifier as requested
    pub request: &'a str,
    /// File path of the requesting module, absent for the entry point
    pub parent: Option<&'a Path>,
    /// Whether this request is the process entry point
    pub is_main: bool,
}

impl<'a> ResolveContext<'a> {
    /// Context for a request made by a loaded module
    pub fn from_module(request: &'a str, parent: &'a Path) -> Self {
        Self {
            request,
            parent: Some(parent),
            is_main: false,
        }
    }

    /// Context for the process entry point
    pub fn entry(request: &'a str) -> Self {
        Self {
            request,
            parent: None,
            is_main: true,
        }
    }
}

/// Decorator over the host's resolver that expands the search space with
/// equivalence candidates for missing relative targets
pub struct ResolveHook<R: Resolver, O: EquivalenceOracle> {
    inner: R,
    oracle: O,
    fsys: Arc<FsCache>,
}

impl<R: Resolver, O: EquivalenceOracle> ResolveHook<R, O> {
    /// Wrap `inner`, consulting `oracle` for missing relative targets
    pub fn new(inner: R, oracle: O, fsys: Arc<FsCache>) -> Self {
        Self {
            inner,
            oracle,
            fsys,
        }
    }

    /// Rewrite target for `request`, if one applies.
    ///
    /// Only relative requests from a known parent are candidates; bare
    /// package specifiers never reach the oracle. A rewrite is returned
    /// only when the literal target is absent and the candidate exists.
    fn rewrite(&self, request: &str, parent: &Path) -> Option<PathBuf> {
        if !request.starts_with("./") && !request.starts_with("../") {
            return None;
        }
        let parent_dir = parent.parent().unwrap_or(Path::new("."));
        let target = normalize(&parent_dir.join(request));

        let candidates = self.oracle.equivalents(&target, true);
        if candidates.is_empty() || self.fsys.file_exists(&target) {
            return None;
        }
        candidates
            .into_iter()
            .find(|candidate| self.fsys.file_exists(candidate))
    }
}

impl<R: Resolver, O: EquivalenceOracle> Resolver for ResolveHook<R, O> {
    fn resolve(&self, request: &str, parent: Option<&Path>) -> Result<PathBuf> {
        if let Some(parent) = parent {
            if let Some(candidate) = self.rewrite(request, parent) {
                tracing::debug!(
                    request,
                    candidate = %candidate.display(),
                    "rewrote missing target to equivalent source"
                );
                return self.inner.resolve(&candidate.to_string_lossy(), Some(parent));
            }
        }
        self.inner.resolve(request, parent)
    }
}

/// Lexically normalize `.` and `..` components so candidate paths compare
/// and stat cleanly. No filesystem access, no symlink resolution.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalents::ExtensionEquivalents;
    use crate::error::HookError;
    use std::fs;
    use tempfile::tempdir;

    /// Resolver standing in for the host: resolves relative/absolute
    /// requests against the parent directory, fails on anything missing.
    struct HostResolver;

    impl Resolver for HostResolver {
        fn resolve(&self, request: &str, parent: Option<&Path>) -> Result<PathBuf> {
            let path = PathBuf::from(request);
            let path = if path.is_absolute() {
                path
            } else {
                let base = parent
                    .and_then(|p| p.parent())
                    .unwrap_or(Path::new("."))
                    .to_path_buf();
                normalize(&base.join(request))
            };
            if path.is_file() {
                Ok(path)
            } else {
                Err(HookError::module_not_found(request))
            }
        }
    }

    fn hook() -> ResolveHook<HostResolver, ExtensionEquivalents> {
        ResolveHook::new(
            HostResolver,
            ExtensionEquivalents::new(),
            Arc::new(FsCache::new()),
        )
    }

    #[test]
    fn test_existing_literal_target_wins() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("main.ts");
        fs::write(dir.path().join("both.js"), "js").unwrap();
        fs::write(dir.path().join("both.ts"), "ts").unwrap();

        let resolved = hook().resolve("./both.js", Some(&parent)).unwrap();
        assert_eq!(resolved, dir.path().join("both.js"));
    }

    #[test]
    fn test_missing_target_rewrites_to_candidate() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("main.ts");
        fs::write(dir.path().join("util.ts"), "export {}").unwrap();

        let resolved = hook().resolve("./util.js", Some(&parent)).unwrap();
        assert_eq!(resolved, dir.path().join("util.ts"));
    }

    #[test]
    fn test_parent_relative_request() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("src");
        fs::create_dir(&nested).unwrap();
        let parent = nested.join("main.ts");
        fs::write(dir.path().join("shared.ts"), "export {}").unwrap();

        let resolved = hook().resolve("../shared.js", Some(&parent)).unwrap();
        assert_eq!(resolved, dir.path().join("shared.ts"));
    }

    #[test]
    fn test_all_candidates_missing_fails_like_inner() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("main.ts");

        let err = hook().resolve("./ghost.js", Some(&parent)).unwrap_err();
        assert!(matches!(err, HookError::ModuleNotFound(_)));
    }

    #[test]
    fn test_bare_specifier_bypasses_oracle() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("main.ts");
        // Even with a plausible source file next door, a bare specifier
        // goes straight to the inner resolver.
        fs::write(dir.path().join("lodash.ts"), "export {}").unwrap();

        let err = hook().resolve("lodash", Some(&parent)).unwrap_err();
        assert!(matches!(err, HookError::ModuleNotFound(_)));
    }

    #[test]
    fn test_entry_point_without_parent_delegates() {
        let dir = tempdir().unwrap();
        let entry = dir.path().join("app.ts");
        fs::write(&entry, "export {}").unwrap();

        let resolved = hook()
            .resolve(entry.to_str().unwrap(), None)
            .unwrap();
        assert_eq!(resolved, entry);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("/a/b/./c/../d.ts")),
            PathBuf::from("/a/b/d.ts")
        );
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
    }
}
