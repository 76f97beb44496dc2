//! Sealing credential records for storage and revealing them to their owner

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::types::{CreatePasswordRequest, PasswordEntry, StoredEntry, UpdatePasswordRequest};
use crate::crypto::CredentialCipher;
use crate::error::Result;

/// Converts credential records between their stored and owner-facing shapes.
///
/// The persistence layer stores [`StoredEntry`] values and hands them back
/// here; only [`PasswordEntry`] values leave the process.
#[derive(Debug, Clone)]
pub struct CredentialSealer {
    cipher: Arc<CredentialCipher>,
}

impl CredentialSealer {
    pub fn new(cipher: Arc<CredentialCipher>) -> Self {
        Self { cipher }
    }

    pub fn cipher(&self) -> &CredentialCipher {
        &self.cipher
    }

    /// Validate a create request and seal its password into a new record
    pub fn seal_new(&self, user_id: Uuid, req: &CreatePasswordRequest) -> Result<StoredEntry> {
        req.validate()?;

        let encrypted_password = self.cipher.seal(&req.password)?;
        let now = Utc::now();
        let stored = StoredEntry {
            id: Uuid::new_v4(),
            user_id,
            service_name: req.service_name.clone(),
            service_url: req.service_url.clone(),
            username: req.username.clone(),
            encrypted_password,
            notes: req.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        info!(id = %stored.id, service = %stored.service_name, "Sealed new credential");
        Ok(stored)
    }

    /// Decrypt a stored record for its owner.
    ///
    /// A token that cannot be opened is an error; the ciphertext is never
    /// substituted for the password.
    pub fn reveal(&self, stored: &StoredEntry) -> Result<PasswordEntry> {
        let password = self.cipher.open(&stored.encrypted_password)?;

        debug!(id = %stored.id, "Revealed credential");
        Ok(PasswordEntry {
            id: stored.id,
            user_id: stored.user_id,
            service_name: stored.service_name.clone(),
            service_url: stored.service_url.clone(),
            username: stored.username.clone(),
            password,
            notes: stored.notes.clone(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    /// Patch a stored record in place.
    ///
    /// A new password is sealed with a fresh nonce before any field is
    /// touched, so a failed seal leaves the record unchanged.
    pub fn apply_update(&self, stored: &mut StoredEntry, req: &UpdatePasswordRequest) -> Result<()> {
        req.validate()?;

        let resealed = if req.password.is_empty() {
            None
        } else {
            Some(self.cipher.seal(&req.password)?)
        };

        if !req.service_name.is_empty() {
            stored.service_name = req.service_name.clone();
        }
        if let Some(url) = &req.service_url {
            stored.service_url = Some(url.clone());
        }
        if let Some(username) = &req.username {
            stored.username = Some(username.clone());
        }
        let password_changed = resealed.is_some();
        if let Some(token) = resealed {
            stored.encrypted_password = token;
        }
        if let Some(notes) = &req.notes {
            stored.notes = Some(notes.clone());
        }
        stored.updated_at = Utc::now();

        info!(id = %stored.id, password_changed, "Updated credential");
        Ok(())
    }
}
