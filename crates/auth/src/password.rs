//! One-way credential hashing (Argon2id, PHC string format).
//!
//! Digests are self-contained: algorithm, version, cost parameters and salt are
//! all encoded in the stored string, so verification needs nothing but the
//! digest and the candidate plaintext.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use catalog_core::{DomainError, DomainResult};

/// A salted password digest, safe to persist.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest read back from storage.
    ///
    /// No parsing happens here; a malformed value simply never verifies.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Check a candidate plaintext against this digest.
    pub fn verify(&self, plaintext: &str) -> bool {
        verify(plaintext, &self.0)
    }
}

impl core::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Argon2id hasher with a fixed cost profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialHasher {
    params: Params,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl CredentialHasher {
    /// Build a hasher with explicit Argon2 costs (memory in KiB, iterations, lanes).
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> DomainResult<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| DomainError::hashing(e.to_string()))?;
        Ok(Self { params })
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> DomainResult<PasswordDigest> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| DomainError::hashing(e.to_string()))?;
        Ok(PasswordDigest(digest.to_string()))
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

/// Verify `plaintext` against a PHC-format digest.
///
/// Recomputes with the parameters embedded in `digest`; the output comparison is
/// constant-time. Any malformed digest yields `false`.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
pub(crate) fn fast_hasher() -> CredentialHasher {
    CredentialHasher::with_params(Params::MIN_M_COST, 1, 1).unwrap()
}
