//! Shared, immutable handler state

use std::sync::Arc;

use tracing::info;
use vault_core::{CredentialCipher, CredentialSealer, Result, SecureGenerator, VaultConfig};

/// Components injected into every request handler.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug)]
pub struct AppState {
    pub generator: SecureGenerator,
    pub sealer: CredentialSealer,
}

impl AppState {
    pub fn new(generator: SecureGenerator, sealer: CredentialSealer) -> Self {
        Self { generator, sealer }
    }

    /// Derive the key and construct the core components from configuration
    pub fn from_config(config: &VaultConfig) -> Result<Arc<Self>> {
        let key = config.key_material()?;
        let sealer = CredentialSealer::new(Arc::new(CredentialCipher::new(key)));
        let generator = SecureGenerator::new().with_policy(config.similar_policy);

        info!(
            key = %config.masked_key(),
            policy = ?config.similar_policy,
            "Initialized credential cipher and password generator"
        );
        Ok(Arc::new(Self::new(generator, sealer)))
    }
}
