//! Cryptographic primitives for credentials at rest
//!
//! This module provides:
//! - Key normalization (and optional Argon2id derivation) into 32-byte key material
//! - AES-256-GCM sealing of secrets into printable ciphertext tokens
//! - Secure memory handling with zeroize

mod cipher;
mod key_derivation;
mod secure_memory;

pub use cipher::{CiphertextToken, CredentialCipher, NONCE_SIZE, TAG_SIZE};
pub use key_derivation::{derive_argon2, normalize_key, KeyDerivation, MIN_SALT_LENGTH};
pub use secure_memory::{redact, KeyMaterial, SecretString, KEY_LENGTH};
