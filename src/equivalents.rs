// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Default equivalence oracle: extension remapping
//!
//! TypeScript projects routinely import `./util.js` while the file on disk
//! is `./util.ts` (the compiler rewrites nothing; the specifier names the
//! *output*). This oracle maps a requested path to the source spellings
//! that could have produced it.

use crate::services::EquivalenceOracle;
use std::path::{Path, PathBuf};

/// Maps output-extension paths to their TypeScript source spellings.
///
/// Candidate order follows resolution priority: `.ts` before `.tsx`, and
/// module-flavored extensions (`.cts`, `.mts`) only for their matching
/// output flavor.
#[derive(Debug, Default)]
pub struct ExtensionEquivalents;

impl ExtensionEquivalents {
    /// Create the default oracle
    pub fn new() -> Self {
        Self
    }

    fn source_extensions(target: &Path) -> &'static [&'static str] {
        match target.extension().and_then(|e| e.to_str()) {
            Some("js") => &["ts", "tsx"],
            Some("cjs") => &["cts"],
            Some("mjs") => &["mts"],
            None => &["ts", "tsx", "cts", "mts"],
            // Already a source extension (or something else entirely).
            Some(_) => &[],
        }
    }
}

impl EquivalenceOracle for ExtensionEquivalents {
    fn equivalents(&self, path: &Path, only_if_missing: bool) -> Vec<PathBuf> {
        if only_if_missing && path.is_file() {
            return Vec::new();
        }
        Self::source_extensions(path)
            .iter()
            .map(|ext| path.with_extension(ext))
            .collect()
    }
}
