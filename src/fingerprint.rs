//! Content-derived fingerprints for identity configurations.
//!
//! Two identities with field-for-field equal declared configuration always
//! produce identical fingerprints, so callers can detect equivalent
//! configurations (for caching or deduplication) without comparing every
//! field.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::role::RoleIdentitySpec;

/// A fixed-length, collision-resistant digest of an identity configuration.
///
/// The fingerprint is the SHA-256 digest of the canonical JSON encoding of
/// the declared fields, and nothing else: it never embeds the serialized
/// configuration and never depends on runtime state such as previously
/// retrieved credentials.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

impl RoleIdentitySpec {
    /// Computes the fingerprint of this configuration.
    ///
    /// Deterministic: the declared fields are serialized in a fixed field
    /// order, with session tags in key order, and the digest is taken over
    /// those bytes. Pure with respect to observable state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the field set cannot be serialized.
    /// This should not occur for well-formed values.
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        let encoded = serde_json::to_vec(self).map_err(Error::Encoding)?;
        let digest = Sha256::digest(&encoded);
        Ok(Fingerprint(digest.into()))
    }
}
