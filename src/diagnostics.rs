// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Compilation diagnostics, the process-wide diagnostic mode, and the sink
//! they are forwarded to

use serde::Deserialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Severity of a compilation diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A hard compilation error
    Error,
    /// A warning
    Warning,
    /// A suggestion
    Suggestion,
    /// An informational message
    Message,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Suggestion => write!(f, "suggestion"),
            Severity::Message => write!(f, "message"),
        }
    }
}

/// A single diagnostic produced by the compile service.
///
/// The hook layer treats the message as opaque; it only enumerates
/// diagnostics and forwards them to the sink in emission order.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity, used to render the line prefix
    pub severity: Severity,
    /// Pre-formatted message text
    pub message: String,
}

impl Diagnostic {
    /// Create an error-severity diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Create a warning-severity diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// What to do with compilation diagnostics, fixed at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagMode {
    /// Drop diagnostics silently
    Ignore,
    /// Print diagnostics to stderr and continue
    #[default]
    Warn,
    /// Print diagnostics to stderr and exit the process non-zero
    Error,
}

impl DiagMode {
    /// Environment variable consulted by [`DiagMode::from_env`]
    pub const ENV_VAR: &'static str = "TSHOOK_DIAG";

    /// Read the diagnostic mode from `TSHOOK_DIAG`, defaulting to `warn`
    /// when the variable is unset or not a recognized mode.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for DiagMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(DiagMode::Ignore),
            "warn" => Ok(DiagMode::Warn),
            "error" => Ok(DiagMode::Error),
            other => Err(format!("unknown diagnostic mode '{}'", other)),
        }
    }
}

/// Destination for forwarded diagnostics.
///
/// Emission is synchronous; the hook layer emits a whole batch in order
/// before deciding whether to fail the load.
pub trait DiagnosticSink {
    /// Emit one diagnostic
    fn emit(&self, diag: &Diagnostic);
}

/// Sink that writes one formatted line per diagnostic to stderr
#[derive(Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, diag: &Diagnostic) {
        let mut err = std::io::stderr().lock();
        // Failure to write diagnostics must not fail the load itself.
        let _ = writeln!(err, "{}", diag);
    }
}
