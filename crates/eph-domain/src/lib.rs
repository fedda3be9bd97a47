#![deny(clippy::all, warnings)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

//! Package-set normalization and environment identity.

use sha2::{Digest, Sha256};

/// Interactive shell package included in every environment.
pub const BASELINE_PACKAGE: &str = "ipython";

/// Sorted, deduplicated, lowercase package names.
///
/// Always contains [`BASELINE_PACKAGE`]. Built once per invocation from raw
/// CLI input and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSet {
    names: Vec<String>,
}

impl PackageSet {
    /// Normalizes raw CLI input into a canonical package set.
    ///
    /// Entries are trimmed, lowercased and deduplicated, blanks dropped, the
    /// baseline shell package inserted, and the result sorted. Requests
    /// naming the same packages in any order, case or multiplicity produce
    /// identical sets.
    pub fn normalize<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = raw
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        names.push(BASELINE_PACKAGE.to_string());
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Entries in sorted order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Stable content hash of the set, used as the on-disk environment key.
    ///
    /// A cache key, not a security boundary.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for name in &self.names {
            hasher.update(name.as_bytes());
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}
