// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Hook wiring and the registration surface
//!
//! [`ModuleHooks`] is what an embedding host installs: the resolve hook is
//! always active, the load hook only on hosts the capability check says
//! need it. Ordering matters: resolution runs before loading, so the
//! resolve hook must rewrite missing targets even on hosts that never get
//! the load hook.

pub mod load;
pub mod resolve;

use crate::config::HookConfig;
use crate::error::Result;
use crate::fsys::FsCache;
use crate::services::{CompileFactory, EquivalenceOracle, OutputCache, Resolver};
use crate::version::load_hook_required;
use load::LoadHook;
use resolve::{ResolveContext, ResolveHook};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Directory whose subtree is excluded from load interception
const DEPENDENCY_DIR: &str = "node_modules";

/// The installed hook pair
pub struct ModuleHooks<R: Resolver, O: EquivalenceOracle, C: OutputCache> {
    resolver: ResolveHook<R, O>,
    /// Present only when the capability check required it
    loader: Option<LoadHook<C>>,
    extensions: Vec<String>,
    ignore_dependency_dirs: bool,
}

impl<R: Resolver, O: EquivalenceOracle, C: OutputCache> ModuleHooks<R, O, C> {
    /// Install the hooks for a host reporting `runtime_version`.
    ///
    /// The version string is parsed once; the load hook is registered only
    /// when the host cannot supply transpiled source through its own load
    /// path. `factory` is the lazy constructor for the compile service and
    /// is invoked at most once, on the first output-cache miss.
    pub fn install(
        runtime_version: &str,
        resolver: R,
        oracle: O,
        cache: C,
        factory: CompileFactory,
        config: HookConfig,
    ) -> Self {
        let fsys = Arc::new(FsCache::new());
        let loader = if load_hook_required(runtime_version) {
            tracing::debug!(
                version = runtime_version,
                "host cannot load transpiled source itself; installing load hook"
            );
            Some(LoadHook::new(
                cache,
                factory,
                config.diag_mode,
                fsys.clone(),
            ))
        } else {
            None
        };
        Self {
            resolver: ResolveHook::new(resolver, oracle, fsys),
            loader,
            extensions: config.extensions,
            ignore_dependency_dirs: config.ignore_dependency_dirs,
        }
    }

    /// Whether the load hook was installed
    pub fn load_hook_installed(&self) -> bool {
        self.loader.is_some()
    }

    /// Resolve one module request through the resolve hook
    pub fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<PathBuf> {
        self.resolver.resolve(ctx.request, ctx.parent)
    }

    /// Produce executable source for a resolved file.
    ///
    /// Passes `code` through untouched when no load hook is installed, when
    /// the file's extension is not on the allow-list, or when the file sits
    /// under a dependency directory.
    pub fn transform(&self, code: &str, file_name: &Path) -> Result<String> {
        let Some(loader) = &self.loader else {
            return Ok(code.to_string());
        };
        if !self.matches_extension(file_name)
            || (self.ignore_dependency_dirs && in_dependency_dir(file_name))
        {
            return Ok(code.to_string());
        }
        loader.transform(code, file_name)
    }

    fn matches_extension(&self, file_name: &Path) -> bool {
        match file_name.extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.') == ext),
            None => false,
        }
    }
}

fn in_dependency_dir(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == DEPENDENCY_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalents::ExtensionEquivalents;
    use crate::error::HookError;
    use crate::services::{CompileOutcome, CompileService};

    /// Inner resolver that fails everything; these tests only exercise the
    /// transform gate.
    struct NoResolver;

    impl Resolver for NoResolver {
        fn resolve(&self, request: &str, _parent: Option<&Path>) -> Result<PathBuf> {
            Err(HookError::module_not_found(request))
        }
    }

    struct EmptyCache;

    impl OutputCache for EmptyCache {
        fn lookup_output(&self, _source: &Path) -> Option<PathBuf> {
            None
        }
    }

    struct NullCompiler;

    impl CompileService for NullCompiler {
        fn compile(&self, _source: &Path) -> CompileOutcome {
            CompileOutcome {
                output: None,
                diagnostics: Vec::new(),
            }
        }
    }

    fn install(version: &str) -> ModuleHooks<NoResolver, ExtensionEquivalents, EmptyCache> {
        let factory: CompileFactory = Box::new(|| Box::new(NullCompiler));
        ModuleHooks::install(
            version,
            NoResolver,
            ExtensionEquivalents::new(),
            EmptyCache,
            factory,
            HookConfig::default(),
        )
    }

    #[test]
    fn test_load_hook_gated_by_version() {
        assert!(install("19.9.0").load_hook_installed());
        assert!(install("20.5.9").load_hook_installed());
        assert!(!install("20.6.0").load_hook_installed());
        assert!(!install("21.0.0").load_hook_installed());
        assert!(install("not-a-version").load_hook_installed());
    }

    #[test]
    fn test_transform_without_load_hook_is_passthrough() {
        let hooks = install("21.0.0");
        let out = hooks.transform("let x: number;", Path::new("/p/a.ts")).unwrap();
        assert_eq!(out, "let x: number;");
    }

    #[test]
    fn test_transform_gates_on_extension() {
        let hooks = install("18.0.0");
        // .json is not on the allow-list; the loader never sees it.
        let out = hooks.transform("{\"a\":1}", Path::new("/p/a.json")).unwrap();
        assert_eq!(out, "{\"a\":1}");
        let out = hooks.transform("plain", Path::new("/p/Makefile")).unwrap();
        assert_eq!(out, "plain");
    }

    #[test]
    fn test_transform_skips_dependency_dirs() {
        let hooks = install("18.0.0");
        let out = hooks
            .transform(
                "let x: number;",
                Path::new("/p/node_modules/pkg/index.ts"),
            )
            .unwrap();
        assert_eq!(out, "let x: number;");
    }

    #[test]
    fn test_in_dependency_dir() {
        assert!(in_dependency_dir(Path::new("/a/node_modules/b/c.ts")));
        assert!(!in_dependency_dir(Path::new("/a/b/c.ts")));
        assert!(!in_dependency_dir(Path::new("/a/node_modules_backup/c.ts")));
    }
}
