// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Runtime version parsing and load-hook capability detection

/// A host runtime version, parsed once at startup and immutable for the
/// life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
}

impl RuntimeVersion {
    /// Parse a version string like `20.6.1` (a leading `v` is tolerated).
    ///
    /// Returns `None` if any of the three components is missing or not a
    /// number; callers treat that as "capability unknown".
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().strip_prefix('v').unwrap_or(raw.trim());
        let mut parts = raw.splitn(3, '.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        // Some hosts report prerelease suffixes like `18.0.0-nightly`.
        let patch_raw = parts.next()?;
        let patch_digits = patch_raw
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .unwrap_or("");
        let patch = patch_digits.parse().ok()?;
        Some(Self {
            major,
            minor,
            patch,
        })
    }

    /// Whether this runtime needs the load hook installed.
    ///
    /// Hosts before 20.6 cannot furnish transpiled source through their own
    /// module-load path, so the hook layer has to supply it.
    pub fn needs_load_hook(&self) -> bool {
        self.major < 20 || (self.major == 20 && self.minor < 6)
    }
}

/// Decide from the host's reported version string whether the load hook is
/// required. Unparseable versions count as requiring it (fail safe toward
/// doing the extra work).
pub fn load_hook_required(raw: &str) -> bool {
    RuntimeVersion::parse(raw).is_none_or(|v| v.needs_load_hook())
}
