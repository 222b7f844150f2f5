// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval: the pending-to-approved transition.

use super::ServiceError;
use crate::codec;
use crate::limits::HASH_LEN;
use crate::store::LogStore;
use tracing::{info, warn};

/// Approves pending records when presented with the administrator credential.
#[derive(Clone)]
pub struct ApprovalService<S> {
    store: S,
    secret: String,
}

impl<S: LogStore> ApprovalService<S> {
    pub fn new(store: S, secret: impl Into<String>) -> Self {
        Self {
            store,
            secret: secret.into(),
        }
    }

    /// Approve the pending record carrying `hash`.
    ///
    /// The matching line is rewritten to its approved form; every other line
    /// is written back byte-identical. A conditional-write conflict is not
    /// retried; the caller must resubmit.
    pub async fn approve(&self, hash: &str, secret: &str) -> Result<String, ServiceError> {
        if hash.is_empty() || secret.is_empty() {
            return Err(ServiceError::Validation(
                "Hash y secret son requeridos.".to_string(),
            ));
        }
        if hash.len() < HASH_LEN {
            return Err(ServiceError::Validation("Hash inválido.".to_string()));
        }
        if secret != self.secret {
            warn!("approval rejected for {}: secret mismatch", hash);
            return Err(ServiceError::Auth);
        }

        let snapshot = self.store.read().await?;
        let updated = codec::approve_in_log(&snapshot.content, hash)
            .ok_or_else(|| ServiceError::NotFound(hash.to_string()))?;

        let summary = format!("Approve commit {}", hash);
        self.store
            .write(&updated, snapshot.version.as_deref(), &summary)
            .await?;

        info!("approved commit {}", hash);
        Ok(hash.to_string())
    }
}

#[cfg(test)]
#[path = "approve_tests.rs"]
mod tests;
