// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Load interceptor
//!
//! Supplies executable JavaScript for TypeScript files on hosts whose own
//! load path cannot. Cache-first: full compilation warms an entire analysis
//! engine, a significant per-process cost, while in the common case the
//! output cache was already populated before this hook runs.

use crate::diagnostics::{DiagMode, DiagnosticSink, StderrSink};
use crate::error::{HookError, Result};
use crate::fsys::FsCache;
use crate::services::{CompileFactory, CompileService, OutputCache};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Extension the host executes natively; files already carrying it pass
/// through untransformed.
const NATIVE_EXT: &str = "js";

/// Decorator over the host's module-load step for TypeScript extensions
pub struct LoadHook<C: OutputCache> {
    cache: C,
    factory: CompileFactory,
    /// Compile service, constructed on first cache miss and reused for the
    /// life of the process. `OnceLock` keeps construction once-only on
    /// multi-threaded hosts.
    service: OnceLock<Box<dyn CompileService>>,
    diag_mode: DiagMode,
    sink: Box<dyn DiagnosticSink>,
    fsys: Arc<FsCache>,
}

impl<C: OutputCache> LoadHook<C> {
    /// Create a load hook that consults `cache` first and compiles through
    /// the service built by `factory` on a miss. Diagnostics go to stderr.
    pub fn new(cache: C, factory: CompileFactory, diag_mode: DiagMode, fsys: Arc<FsCache>) -> Self {
        Self::with_sink(cache, factory, diag_mode, Box::new(StderrSink), fsys)
    }

    /// Same as [`LoadHook::new`] with an explicit diagnostic sink
    pub fn with_sink(
        cache: C,
        factory: CompileFactory,
        diag_mode: DiagMode,
        sink: Box<dyn DiagnosticSink>,
        fsys: Arc<FsCache>,
    ) -> Self {
        Self {
            cache,
            factory,
            service: OnceLock::new(),
            diag_mode,
            sink,
            fsys,
        }
    }

    /// Produce executable source for `file_name`, whose raw contents are
    /// `code`.
    ///
    /// Native-extension files with non-empty source return unchanged, then
    /// the output cache is consulted, then the compile service. When
    /// compilation yields no readable output the original `code` comes back
    /// unchanged; a broken single file must not take down unrelated loads.
    /// Under diagnostic mode `error` a diagnosed compilation returns
    /// [`HookError::CompileBlocked`] after emitting, and the host must exit
    /// non-zero without executing anything.
    pub fn transform(&self, code: &str, file_name: &Path) -> Result<String> {
        if file_name.extension().and_then(|e| e.to_str()) == Some(NATIVE_EXT) && !code.is_empty() {
            return Ok(code.to_string());
        }

        if let Some(output) = self.cache.lookup_output(file_name) {
            if let Some(text) = self.fsys.read(&output).filter(|t| !t.is_empty()) {
                tracing::debug!(file = %file_name.display(), "serving precompiled output");
                return Ok(text);
            }
        }

        // Cold path: compile inline.
        let service = self.service.get_or_init(|| {
            tracing::debug!("warming compile service");
            (self.factory)()
        });
        let outcome = service.compile(file_name);

        if !outcome.diagnostics.is_empty() && self.diag_mode != DiagMode::Ignore {
            for diag in &outcome.diagnostics {
                self.sink.emit(diag);
            }
            if self.diag_mode == DiagMode::Error {
                return Err(HookError::CompileBlocked {
                    diagnostics: outcome.diagnostics.len(),
                });
            }
        }

        let compiled = outcome
            .output
            .and_then(|file| self.fsys.read(&file))
            .filter(|t| !t.is_empty());
        Ok(compiled.unwrap_or_else(|| code.to_string()))
    }
}
