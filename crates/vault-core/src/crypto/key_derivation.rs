//! Turning operator-supplied key text into fixed-length key material
//!
//! The default [`KeyDerivation::Normalize`] path trims, strips `%`, then
//! truncates or right-pads with ASCII `0` to exactly 32 bytes. It is total:
//! every input produces a key. It is not a KDF; deployments that want one
//! can opt into [`KeyDerivation::Argon2id`] with a configured salt.

use argon2::{Algorithm, Argon2, Params, Version};
use tracing::{debug, warn};
use zeroize::Zeroize;

use super::secure_memory::{redact, KeyMaterial, KEY_LENGTH};
use crate::error::{Result, VaultError};

/// Byte used to right-pad short keys
const PAD_BYTE: u8 = b'0';

/// Minimum salt length accepted for Argon2id derivation
pub const MIN_SALT_LENGTH: usize = 16;

/// How the configured key text becomes key material
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyDerivation {
    /// Trim, strip `%`, truncate or pad to 32 bytes
    #[default]
    Normalize,
    /// Argon2id over the cleaned key text with a fixed salt
    Argon2id { salt: String },
}

impl KeyMaterial {
    /// Derive key material using the configured strategy
    pub fn derive(input: &str, derivation: &KeyDerivation) -> Result<Self> {
        match derivation {
            KeyDerivation::Normalize => Ok(normalize_key(input)),
            KeyDerivation::Argon2id { salt } => derive_argon2(input, salt.as_bytes()),
        }
    }
}

/// Trim whitespace and drop `%` characters left over from URL escaping
fn clean(input: &str) -> String {
    input.trim().chars().filter(|c| *c != '%').collect()
}

/// Normalize key text to exactly 32 bytes.
///
/// Never fails. A warning is logged (with the key masked) when the cleaned
/// input had to be truncated or padded.
pub fn normalize_key(input: &str) -> KeyMaterial {
    let mut cleaned = clean(input);
    let bytes = cleaned.as_bytes();
    let mut key = [PAD_BYTE; KEY_LENGTH];

    if bytes.len() > KEY_LENGTH {
        key.copy_from_slice(&bytes[..KEY_LENGTH]);
        warn!(
            key = %redact(&cleaned),
            original_len = bytes.len(),
            "Encryption key was too long, truncated to {} bytes",
            KEY_LENGTH
        );
    } else {
        key[..bytes.len()].copy_from_slice(bytes);
        if bytes.len() < KEY_LENGTH {
            warn!(
                key = %redact(&cleaned),
                original_len = bytes.len(),
                "Encryption key was too short, padded to {} bytes",
                KEY_LENGTH
            );
        }
    }

    cleaned.zeroize();
    let material = KeyMaterial::new(key);
    key.zeroize();
    material
}

/// Derive a 256-bit key with Argon2id
pub fn derive_argon2(input: &str, salt: &[u8]) -> Result<KeyMaterial> {
    if salt.len() < MIN_SALT_LENGTH {
        return Err(VaultError::KeyDerivation(format!(
            "salt must be at least {} bytes, got {}",
            MIN_SALT_LENGTH,
            salt.len()
        )));
    }

    let params = Params::new(19_456, 2, 1, Some(KEY_LENGTH))
        .map_err(|e| VaultError::KeyDerivation(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut cleaned = clean(input);
    let mut key = [0u8; KEY_LENGTH];
    let outcome = argon2.hash_password_into(cleaned.as_bytes(), salt, &mut key);
    cleaned.zeroize();
    outcome.map_err(|e| VaultError::KeyDerivation(e.to_string()))?;

    debug!("Derived encryption key with Argon2id");
    let material = KeyMaterial::new(key);
    key.zeroize();
    Ok(material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    const SALT: &str = "0123456789abcdef";

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `normalize_key` under a subscriber that records WARN output
    fn normalize_logged(input: &str) -> String {
        let writer = CaptureWriter::default();
        let sink = writer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            normalize_key(input);
        });

        let bytes = writer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_normalize_lengths() {
        for len in [0usize, 31, 32, 33, 200] {
            let input = "k".repeat(len);
            let key = normalize_key(&input);
            assert_eq!(key.as_bytes().len(), KEY_LENGTH, "input length {}", len);
        }
    }

    #[test]
    fn test_normalize_exact_length_unchanged() {
        let input = "abcdefghijklmnopqrstuvwxyz012345";
        let key = normalize_key(input);
        assert_eq!(key.as_bytes(), input.as_bytes());
    }

    #[test]
    fn test_normalize_pads_with_ascii_zero() {
        let key = normalize_key("short-key");
        assert_eq!(&key.as_bytes()[..9], b"short-key");
        assert!(key.as_bytes()[9..].iter().all(|b| *b == b'0'));

        let empty = normalize_key("");
        assert_eq!(empty.as_bytes(), &[b'0'; 32]);
    }

    #[test]
    fn test_normalize_truncates() {
        let input = format!("{}{}", "a".repeat(32), "b".repeat(168));
        let key = normalize_key(&input);
        assert_eq!(key.as_bytes(), &[b'a'; 32]);
    }

    #[test]
    fn test_normalize_strips_percent_before_adjusting() {
        let input = "%%abcdefghijklmnop%qrstuvwxyz012345%";
        let key = normalize_key(input);
        assert_eq!(key.as_bytes(), b"abcdefghijklmnopqrstuvwxyz012345");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let key = normalize_key("  \tabcdefghijklmnopqrstuvwxyz012345\n");
        assert_eq!(key.as_bytes(), b"abcdefghijklmnopqrstuvwxyz012345");
    }

    #[test]
    fn test_pad_warning_masks_key() {
        let raw = "operator-key-twenty-eight-ch";
        let output = normalize_logged(raw);

        assert!(output.contains("padded to 32 bytes"), "{}", output);
        assert!(output.contains("original_len=28"), "{}", output);
        assert!(output.contains(&redact(raw)), "{}", output);
        assert!(output.contains("op************************ch"), "{}", output);
        assert!(!output.contains(raw));
    }

    #[test]
    fn test_truncate_warning_masks_key() {
        let raw = "operator-key-that-runs-well-past-forty-b";
        let output = normalize_logged(raw);

        assert!(output.contains("truncated to 32 bytes"), "{}", output);
        assert!(output.contains("original_len=40"), "{}", output);
        assert!(output.contains(&redact(raw)), "{}", output);
        assert!(!output.contains(raw));
        assert!(!output.contains(&raw[..32]));
    }

    #[test]
    fn test_exact_length_does_not_warn() {
        let output = normalize_logged("abcdefghijklmnopqrstuvwxyz012345");
        assert!(output.is_empty(), "{}", output);
    }

    #[test]
    fn test_derive_normalize_matches_normalize_key() {
        let derived = KeyMaterial::derive("some key", &KeyDerivation::Normalize).unwrap();
        assert_eq!(derived.as_bytes(), normalize_key("some key").as_bytes());
    }

    #[test]
    fn test_argon2_deterministic_and_distinct() {
        let derivation = KeyDerivation::Argon2id {
            salt: SALT.to_string(),
        };
        let key1 = KeyMaterial::derive("operator key", &derivation).unwrap();
        let key2 = KeyMaterial::derive("operator key", &derivation).unwrap();
        let other = KeyMaterial::derive("another key", &derivation).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
        assert_ne!(key1.as_bytes(), other.as_bytes());
        assert_ne!(key1.as_bytes(), normalize_key("operator key").as_bytes());
    }

    #[test]
    fn test_argon2_rejects_short_salt() {
        let result = derive_argon2("operator key", b"short");
        assert!(matches!(result, Err(VaultError::KeyDerivation(_))));
    }
}
