//! Error types for vault-core

use thiserror::Error;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault error types
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Secure random source is unavailable")]
    RandomnessUnavailable,

    #[error("Ciphertext token is malformed")]
    MalformedToken,

    #[error("Ciphertext token failed authentication")]
    AuthenticationFailed,

    #[error("Charset specification cannot be satisfied: {0}")]
    UnsatisfiableCharsetSpec(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}

impl VaultError {
    /// Whether the error was caused by caller input rather than the vault itself
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsatisfiableCharsetSpec(_) | Self::InvalidRequest(_) | Self::NoFieldsToUpdate
        )
    }

    /// Whether the error means a stored secret cannot be recovered.
    ///
    /// Malformed and unauthenticated tokens are reported through this single
    /// predicate so callers never branch on which of the two occurred.
    pub fn is_unrecoverable_secret(&self) -> bool {
        matches!(self, Self::MalformedToken | Self::AuthenticationFailed)
    }
}
