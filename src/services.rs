// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Collaborator interfaces the hook layer delegates to
//!
//! The hooks are decorators: each wraps a "next" implementation supplied by
//! the embedding host and consults a few external services. Everything the
//! hook layer does not own lives behind one of these traits.

use crate::diagnostics::Diagnostic;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// The host runtime's specifier-to-file resolution step.
///
/// [`ResolveHook`](crate::hooks::resolve::ResolveHook) wraps one of these
/// and delegates to it for every request it does not rewrite. Resolution
/// failures propagate from here unchanged.
pub trait Resolver {
    /// Resolve `request` to an absolute file path. `parent` is the file
    /// path of the requesting module, absent for the process entry point.
    fn resolve(&self, request: &str, parent: Option<&Path>) -> Result<PathBuf>;
}

/// Produces alternate paths considered interchangeable with a requested
/// path under a different extension.
pub trait EquivalenceOracle {
    /// Ordered candidate paths for `path`; empty when none apply.
    ///
    /// With `only_if_missing` set, an existing `path` yields no candidates
    /// (an existing literal file is never second-guessed).
    fn equivalents(&self, path: &Path, only_if_missing: bool) -> Vec<PathBuf>;
}

/// Lookup of previously compiled output for a source file
pub trait OutputCache {
    /// Path to the compiled output for `source`, or `None` when the cache
    /// has nothing for it.
    fn lookup_output(&self, source: &Path) -> Option<PathBuf>;
}

/// Result of compiling one source file
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// Path to the produced output file, absent when compilation produced
    /// nothing usable
    pub output: Option<PathBuf>,
    /// Diagnostics in emission order
    pub diagnostics: Vec<Diagnostic>,
}

/// The compilation engine, obtained lazily because constructing one carries
/// significant per-process overhead (it warms a whole analysis engine).
pub trait CompileService: Send + Sync {
    /// Compile `source`, returning the output path and any diagnostics
    fn compile(&self, source: &Path) -> CompileOutcome;
}

/// Factory for the compile service. Invoked at most once per process, on
/// the first output-cache miss.
pub type CompileFactory = Box<dyn Fn() -> Box<dyn CompileService> + Send + Sync>;
