//! Payload digests.
//!
//! A digest identifies one encoded metadata payload so two pipeline runs can
//! be compared without diffing hex. Format: `"sha256:<hex>"` over the raw
//! payload bytes (no domain prefix, so any SHA-256 tool reproduces it).

use std::fmt;

use sha2::{Digest, Sha256};

/// Algorithm label used in every digest this crate produces.
pub const DIGEST_ALGORITHM: &str = "sha256";

/// A content digest in `"algorithm:hex_digest"` form.
///
/// Invariant: exactly one `:` with non-empty text on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayloadDigest {
    full: String,
    colon: usize,
}

impl PayloadDigest {
    /// SHA-256 of `bytes`.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        let hex = hex::encode(Sha256::digest(bytes));
        Self {
            colon: DIGEST_ALGORITHM.len(),
            full: format!("{DIGEST_ALGORITHM}:{hex}"),
        }
    }

    /// Parse `"algorithm:hex"`. Returns `None` if either side is empty or
    /// there is no separator.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Display for PayloadDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}
