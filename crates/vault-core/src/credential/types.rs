//! Credential record and request definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroize;

use crate::crypto::CiphertextToken;
use crate::error::{Result, VaultError};
use crate::generator::CharsetSpec;

pub const MAX_SERVICE_NAME_LEN: usize = 255;
pub const MAX_SERVICE_URL_LEN: usize = 500;
pub const MAX_USERNAME_LEN: usize = 255;

/// Credential as returned to its owner, with the password decrypted.
///
/// Carries no ciphertext field.
#[derive(Clone, Serialize, Deserialize)]
pub struct PasswordEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Plaintext password (only for responses after decryption)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Drop for PasswordEntry {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl std::fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordEntry")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("service_name", &self.service_name)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Credential as handed to the persistence layer (password sealed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_name: String,
    pub service_url: Option<String>,
    pub username: Option<String>,
    /// Sealed password token
    pub encrypted_password: CiphertextToken,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a credential
#[derive(Clone, Deserialize)]
pub struct CreatePasswordRequest {
    pub service_name: String,
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreatePasswordRequest {
    pub fn validate(&self) -> Result<()> {
        if self.service_name.is_empty() || self.password.is_empty() {
            return Err(VaultError::InvalidRequest(
                "Service name and password are required".to_string(),
            ));
        }
        check_len("service_name", Some(&self.service_name), MAX_SERVICE_NAME_LEN)?;
        check_len("service_url", self.service_url.as_ref(), MAX_SERVICE_URL_LEN)?;
        check_len("username", self.username.as_ref(), MAX_USERNAME_LEN)
    }
}

impl Drop for CreatePasswordRequest {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl std::fmt::Debug for CreatePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatePasswordRequest")
            .field("service_name", &self.service_name)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Request body for patching a credential.
///
/// Empty strings and `None` leave the corresponding field unchanged.
#[derive(Clone, Default, Deserialize)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdatePasswordRequest {
    /// Whether the request would change anything
    pub fn is_empty(&self) -> bool {
        self.service_name.is_empty()
            && self.service_url.is_none()
            && self.username.is_none()
            && self.password.is_empty()
            && self.notes.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(VaultError::NoFieldsToUpdate);
        }
        check_len("service_name", Some(&self.service_name), MAX_SERVICE_NAME_LEN)?;
        check_len("service_url", self.service_url.as_ref(), MAX_SERVICE_URL_LEN)?;
        check_len("username", self.username.as_ref(), MAX_USERNAME_LEN)
    }
}

impl Drop for UpdatePasswordRequest {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl std::fmt::Debug for UpdatePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdatePasswordRequest")
            .field("service_name", &self.service_name)
            .field("password_changed", &!self.password.is_empty())
            .finish_non_exhaustive()
    }
}

fn check_len(field: &str, value: Option<&String>, max: usize) -> Result<()> {
    match value {
        Some(v) if v.len() > max => Err(VaultError::InvalidRequest(format!(
            "{} must be at most {} bytes",
            field, max
        ))),
        _ => Ok(()),
    }
}

/// Request body for the password generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratePasswordRequest {
    pub length: i64,
    pub include_upper: bool,
    pub include_lower: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub exclude_similar: bool,
}

impl From<&GeneratePasswordRequest> for CharsetSpec {
    fn from(req: &GeneratePasswordRequest) -> Self {
        Self {
            // Negative lengths fall back to the default like zero does
            length: usize::try_from(req.length).unwrap_or(0),
            upper: req.include_upper,
            lower: req.include_lower,
            digits: req.include_numbers,
            symbols: req.include_symbols,
            exclude_similar: req.exclude_similar,
        }
    }
}

/// Response body for the password generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePasswordResponse {
    pub password: String,
}
