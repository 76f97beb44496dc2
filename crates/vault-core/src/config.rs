//! Process configuration
//!
//! Read once at startup from environment variables. The encryption key is
//! kept as a [`SecretString`] and only ever echoed back masked.

use tracing::warn;

use crate::crypto::{redact, KeyDerivation, KeyMaterial, SecretString, MIN_SALT_LENGTH};
use crate::error::{Result, VaultError};
use crate::generator::SimilarPolicy;

pub const DEFAULT_PORT: u16 = 8080;

/// Firebase project id shipped in the sample environment file
const PLACEHOLDER_FIREBASE_PROJECT: &str = "your-firebase-project-id";

/// Vault configuration
#[derive(Clone)]
pub struct VaultConfig {
    pub database_url: String,
    pub encryption_key: SecretString,
    pub firebase_project_id: String,
    pub google_application_credentials: String,
    pub port: u16,
    pub key_derivation: KeyDerivation,
    pub similar_policy: SimilarPolicy,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            encryption_key: SecretString::default(),
            firebase_project_id: String::new(),
            google_application_credentials: String::new(),
            port: DEFAULT_PORT,
            key_derivation: KeyDerivation::default(),
            similar_policy: SimilarPolicy::default(),
        }
    }
}

impl VaultConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| VaultError::Config(format!("invalid PORT: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let key_derivation = match get("ENCRYPTION_KEY_SALT") {
            Some(salt) if salt.len() < MIN_SALT_LENGTH => {
                return Err(VaultError::Config(format!(
                    "ENCRYPTION_KEY_SALT must be at least {} bytes",
                    MIN_SALT_LENGTH
                )));
            }
            Some(salt) => KeyDerivation::Argon2id { salt },
            None => KeyDerivation::Normalize,
        };

        let similar_policy = match get("EXCLUDE_SIMILAR_POLICY") {
            Some(raw) => raw.parse::<SimilarPolicy>().map_err(VaultError::Config)?,
            None => SimilarPolicy::default(),
        };

        let config = Self {
            database_url: get("DATABASE_URL").unwrap_or_default(),
            encryption_key: SecretString::new(get("ENCRYPTION_KEY").unwrap_or_default()),
            firebase_project_id: get("FIREBASE_PROJECT_ID").unwrap_or_default(),
            google_application_credentials: get("GOOGLE_APPLICATION_CREDENTIALS")
                .unwrap_or_default(),
            port,
            key_derivation,
            similar_policy,
        };

        config.warn_on_weak_settings();
        Ok(config)
    }

    fn warn_on_weak_settings(&self) {
        if self.encryption_key.expose().trim().is_empty() {
            warn!("ENCRYPTION_KEY is not set, sealing with a padding-only key");
        }
        if self.firebase_project_id == PLACEHOLDER_FIREBASE_PROJECT {
            warn!("Using default Firebase project ID. Set FIREBASE_PROJECT_ID environment variable.");
        }
    }

    /// Build the key material once for the process lifetime
    pub fn key_material(&self) -> Result<KeyMaterial> {
        KeyMaterial::derive(self.encryption_key.expose(), &self.key_derivation)
    }

    /// Masked form of the encryption key for startup diagnostics
    pub fn masked_key(&self) -> String {
        redact(self.encryption_key.expose().trim())
    }
}

impl std::fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let derivation = match &self.key_derivation {
            KeyDerivation::Normalize => "normalize",
            KeyDerivation::Argon2id { .. } => "argon2id",
        };

        f.debug_struct("VaultConfig")
            .field("database_url", &redact(&self.database_url))
            .field("encryption_key", &self.masked_key())
            .field("firebase_project_id", &self.firebase_project_id)
            .field("google_application_credentials", &self.google_application_credentials)
            .field("port", &self.port)
            .field("key_derivation", &derivation)
            .field("similar_policy", &self.similar_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = VaultConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.encryption_key.is_empty());
        assert_eq!(config.key_derivation, KeyDerivation::Normalize);
        assert_eq!(config.similar_policy, SimilarPolicy::Strict);
        assert_eq!(config.key_material().unwrap().as_bytes(), &[b'0'; 32]);
    }

    #[test]
    fn test_reads_variables() {
        let config = VaultConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://vault@localhost/vault"),
            ("ENCRYPTION_KEY", "abcdefghijklmnopqrstuvwxyz012345"),
            ("FIREBASE_PROJECT_ID", "vault-prod"),
            ("PORT", "9090"),
            ("EXCLUDE_SIMILAR_POLICY", "keep_required"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://vault@localhost/vault");
        assert_eq!(config.firebase_project_id, "vault-prod");
        assert_eq!(config.port, 9090);
        assert_eq!(config.similar_policy, SimilarPolicy::KeepRequired);
        assert_eq!(
            config.key_material().unwrap().as_bytes(),
            b"abcdefghijklmnopqrstuvwxyz012345"
        );
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = VaultConfig::from_lookup(lookup(&[("PORT", ""), ("ENCRYPTION_KEY_SALT", "")]))
            .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.key_derivation, KeyDerivation::Normalize);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            VaultConfig::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(VaultError::Config(_))
        ));
        assert!(matches!(
            VaultConfig::from_lookup(lookup(&[("ENCRYPTION_KEY_SALT", "short")])),
            Err(VaultError::Config(_))
        ));
        assert!(matches!(
            VaultConfig::from_lookup(lookup(&[("EXCLUDE_SIMILAR_POLICY", "lenient")])),
            Err(VaultError::Config(_))
        ));
    }

    #[test]
    fn test_salt_selects_argon2() {
        let config = VaultConfig::from_lookup(lookup(&[
            ("ENCRYPTION_KEY", "operator key"),
            ("ENCRYPTION_KEY_SALT", "0123456789abcdef"),
        ]))
        .unwrap();

        assert!(matches!(config.key_derivation, KeyDerivation::Argon2id { .. }));
        assert_eq!(config.key_material().unwrap().as_bytes().len(), 32);
    }

    #[test]
    fn test_debug_masks_secrets() {
        let config = VaultConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://user:pa55word@db/vault"),
            ("ENCRYPTION_KEY", "super-secret-encryption-key"),
        ]))
        .unwrap();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-encryption-key"));
        assert!(!debug.contains("pa55word"));
        assert!(debug.contains("su"));
    }
}
