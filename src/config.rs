// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Hook configuration

use crate::diagnostics::DiagMode;
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Configuration for the hook layer, fixed at install time
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// What to do with compilation diagnostics
    pub diag_mode: DiagMode,

    /// File extensions routed through the load hook
    pub extensions: Vec<String>,

    /// Whether files under `node_modules` bypass the load hook
    pub ignore_dependency_dirs: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            diag_mode: DiagMode::default(),
            extensions: vec![".ts".to_string(), ".cts".to_string()],
            ignore_dependency_dirs: true,
        }
    }
}

impl HookConfig {
    /// Defaults with the diagnostic mode taken from `TSHOOK_DIAG`
    pub fn from_env() -> Self {
        Self {
            diag_mode: DiagMode::from_env(),
            ..Self::default()
        }
    }

    /// Load from a JSON config file; unset fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = HookConfig::default();
        assert_eq!(config.diag_mode, DiagMode::Warn);
        assert_eq!(config.extensions, vec![".ts", ".cts"]);
        assert!(config.ignore_dependency_dirs);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tshook.json");
        fs::write(&path, r#"{ "diag_mode": "error" }"#).unwrap();

        let config = HookConfig::load(&path).unwrap();
        assert_eq!(config.diag_mode, DiagMode::Error);
        assert_eq!(config.extensions, vec![".ts", ".cts"]);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tshook.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(HookConfig::load(&path).is_err());
    }
}
