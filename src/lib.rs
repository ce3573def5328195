// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # tshook
//!
//! Transparent TypeScript module interception for CommonJS-style runtimes.
//!
//! A host runtime that natively executes only JavaScript can use this crate
//! to load and run TypeScript modules without any per-project configuration.
//! The crate wraps two of the host's internal module-system steps:
//!
//! - **Resolution**: when a relative specifier points at a file that does not
//!   exist (typically a `.js` path emitted by a compiler that was never run),
//!   the resolve hook rewrites it to an equivalent TypeScript source file
//!   that *does* exist.
//! - **Loading**: on hosts too old to furnish transpiled source through their
//!   own load path (detected from the runtime version), the load hook
//!   supplies executable JavaScript for `.ts`/`.cts` files, consulting a
//!   precompiled-output cache before falling back to on-demand compilation.
//!
//! The compiler, the output cache's storage, and the equivalence policy are
//! external collaborators behind traits; the crate ships a default
//! extension-mapping [`EquivalenceOracle`] and nothing else.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tshook::{HookConfig, ModuleHooks, ResolveContext};
//!
//! let hooks = ModuleHooks::install(
//!     runtime.version(),          // e.g. "20.5.1"
//!     runtime.resolver(),         // the host's own resolver
//!     tshook::ExtensionEquivalents::new(),
//!     my_output_cache,
//!     Box::new(|| Box::new(my_compiler())),
//!     HookConfig::from_env(),
//! );
//!
//! let path = hooks.resolve(&ResolveContext::from_module("./app.js", parent))?;
//! let source = hooks.transform(&raw, &path)?;
//! ```
//!
//! A [`HookError::CompileBlocked`] return from [`ModuleHooks::transform`]
//! means diagnostic mode `error` rejected the compilation; the embedding
//! host is expected to exit non-zero immediately rather than execute the
//! module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod equivalents;
pub mod error;
pub mod fsys;
pub mod hooks;
pub mod services;
pub mod version;

// Re-exports
pub use config::HookConfig;
pub use diagnostics::{DiagMode, Diagnostic, DiagnosticSink, Severity, StderrSink};
pub use equivalents::ExtensionEquivalents;
pub use error::{HookError, Result};
pub use fsys::FsCache;
pub use hooks::load::LoadHook;
pub use hooks::resolve::{ResolveContext, ResolveHook};
pub use hooks::ModuleHooks;
pub use services::{
    CompileFactory, CompileOutcome, CompileService, EquivalenceOracle, OutputCache, Resolver,
};
pub use version::{load_hook_required, RuntimeVersion};

/// Version of the tshook crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
