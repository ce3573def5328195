// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the hook layer

use thiserror::Error;

/// Result type for hook operations
pub type Result<T> = std::result::Result<T, HookError>;

/// Errors that can occur while resolving or transforming a module
#[derive(Debug, Error)]
pub enum HookError {
    /// Module not found by the underlying resolver
    #[error("Cannot find module '{0}'")]
    ModuleNotFound(String),

    /// File system error
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parsing error
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Diagnostic mode `error` rejected a compilation. The embedding host
    /// must exit non-zero immediately; no module output is returned.
    #[error("compilation blocked by {diagnostics} diagnostic(s)")]
    CompileBlocked {
        /// Number of diagnostics emitted before the failure
        diagnostics: usize,
    },
}

impl HookError {
    /// Create a module not found error
    pub fn module_not_found(module: impl Into<String>) -> Self {
        Self::ModuleNotFound(module.into())
    }
}
