//! # Record Digests
//!
//! A SHA-256 digest over the canonical bytes of a model value. Eligibility
//! consumers use it as a cache key for an entire client record: two
//! records that serialize to the same canonical JSON get the same digest,
//! regardless of the date format or field order the source used.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::CanonicalizationError;

/// A SHA-256 digest of canonical record bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordDigest([u8; 32]);

impl RecordDigest {
    /// Digest already-canonical bytes.
    pub fn of(data: &CanonicalBytes) -> Self {
        let hash = Sha256::digest(data.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for RecordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Canonicalize and digest a model value in one step.
///
/// # Errors
///
/// Propagates [`CanonicalizationError`] from [`CanonicalBytes::new`].
pub fn record_digest(value: &impl Serialize) -> Result<RecordDigest, CanonicalizationError> {
    Ok(RecordDigest::of(&CanonicalBytes::new(value)?))
}
