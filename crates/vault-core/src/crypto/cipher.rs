//! AES-256-GCM sealing of individual credential secrets
//!
//! Token format: standard base64 of `nonce || ciphertext || auth_tag`
//! - Nonce: 12 bytes (96 bits), freshly drawn from the OS CSPRNG per seal
//! - Ciphertext: same length as the plaintext
//! - Auth tag: 16 bytes (128 bits)

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use super::secure_memory::KeyMaterial;
use crate::error::{Result, VaultError};

/// Nonce size for AES-GCM (12 bytes)
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// Printable, storage-safe encoding of a sealed secret
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CiphertextToken(String);

impl CiphertextToken {
    /// Wrap a token read back from storage (validated on open)
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CiphertextToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for CiphertextToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CiphertextToken({} chars)", self.0.len())
    }
}

/// Authenticated encryption of single secret strings under a held key.
///
/// Holds no mutable state; `seal` and `open` may be called concurrently
/// through a shared reference.
pub struct CredentialCipher {
    key: KeyMaterial,
}

impl CredentialCipher {
    /// Create a cipher owning the given key material
    pub fn new(key: KeyMaterial) -> Self {
        Self { key }
    }

    fn aead(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.key.as_bytes()))
    }

    /// Encrypt a plaintext secret with a fresh random nonce
    pub fn seal(&self, plaintext: &str) -> Result<CiphertextToken> {
        self.seal_with_rng(plaintext, &mut OsRng)
    }

    /// Encrypt using the supplied CSPRNG for the nonce
    pub fn seal_with_rng<R>(&self, plaintext: &str, rng: &mut R) -> Result<CiphertextToken>
    where
        R: RngCore + CryptoRng,
    {
        let mut nonce = [0u8; NONCE_SIZE];
        rng.try_fill_bytes(&mut nonce)
            .map_err(|_| VaultError::RandomnessUnavailable)?;

        // aes-gcm appends the auth tag to the ciphertext
        let ciphertext_with_tag = self
            .aead()
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| VaultError::InvalidRequest("plaintext too large to seal".to_string()))?;

        let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext_with_tag.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext_with_tag);

        Ok(CiphertextToken(STANDARD.encode(blob)))
    }

    /// Decrypt and authenticate a token, returning the original plaintext
    pub fn open(&self, token: &CiphertextToken) -> Result<String> {
        let blob = STANDARD
            .decode(token.as_str())
            .map_err(|_| VaultError::MalformedToken)?;

        if blob.len() < NONCE_SIZE + TAG_SIZE {
            return Err(VaultError::MalformedToken);
        }

        let (nonce, ciphertext_with_tag) = blob.split_at(NONCE_SIZE);
        let plaintext = self
            .aead()
            .decrypt(Nonce::from_slice(nonce), ciphertext_with_tag)
            .map_err(|_| VaultError::AuthenticationFailed)?;

        // Authenticated bytes were sealed from a &str, so this only fails
        // for tokens produced outside this cipher under the same key.
        String::from_utf8(plaintext).map_err(|_| VaultError::AuthenticationFailed)
    }
}

impl std::fmt::Debug for CredentialCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCipher")
            .field("algorithm", &"AES-256-GCM")
            .finish_non_exhaustive()
    }
}
