//! # vault-core
//!
//! Core functionality for the credential vault:
//! - Key normalization into 32-byte key material (optional Argon2id)
//! - AES-256-GCM sealing of secrets into printable ciphertext tokens
//! - Cryptographically secure password generation with class constraints
//! - Credential records and the sealing layer used by persistence

pub mod config;
pub mod credential;
pub mod crypto;
pub mod error;
pub mod generator;

#[cfg(test)]
pub(crate) mod testing;

pub use config::VaultConfig;
pub use credential::{
    CreatePasswordRequest, CredentialSealer, GeneratePasswordRequest, GeneratePasswordResponse,
    PasswordEntry, StoredEntry, UpdatePasswordRequest,
};
pub use crypto::{CiphertextToken, CredentialCipher, KeyDerivation, KeyMaterial, SecretString};
pub use error::{Result, VaultError};
pub use generator::{CharClass, CharsetSpec, SecureGenerator, SimilarPolicy};
