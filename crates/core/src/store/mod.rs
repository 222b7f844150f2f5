// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log store adapter trait and error taxonomy.
//!
//! The remote backing file is the sole durable state. Each request performs
//! one read-modify-write cycle; concurrency control is the store's
//! conditional write, nothing application-side, and there is no retry loop.

use async_trait::async_trait;
use thiserror::Error;

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStore, StoreCall};

/// Errors from log store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Remote store could not be reached (network, DNS, timeout).
    #[error("store unreachable: {0}")]
    Unavailable(String),
    /// Conditional write rejected: the version token no longer matches.
    #[error("version conflict: the backing file changed since it was read")]
    Conflict,
    /// Store rejected the credential.
    #[error("store authentication failed: {0}")]
    Auth(String),
    /// API request failed with a structured status.
    #[error("store API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// Response payload could not be parsed.
    #[error("store parse error: {0}")]
    Parse(String),
    /// This store does not accept writes.
    #[error("store is read-only")]
    ReadOnly,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Backing file contents plus the version token for conditional writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSnapshot {
    pub content: String,
    /// Store version token; `None` when the file does not exist yet.
    pub version: Option<String>,
}

impl LogSnapshot {
    /// Snapshot used for the first write, before the backing file exists.
    pub fn empty() -> Self {
        Self {
            content: crate::limits::LOG_HEADER.to_string(),
            version: None,
        }
    }
}

/// Receipt for a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    /// Store-assigned change identifier, when the store provides one.
    pub change_id: Option<String>,
}

/// Adapter for the remote backing file.
#[async_trait]
pub trait LogStore: Clone + Send + Sync + 'static {
    /// Fetch the backing file and its version token.
    async fn read(&self) -> Result<LogSnapshot, StoreError>;

    /// Write the full new content, conditioned on the version token from the
    /// snapshot the mutation was based on. `summary` describes the change for
    /// stores that record one.
    async fn write(
        &self,
        content: &str,
        version: Option<&str>,
        summary: &str,
    ) -> Result<WriteReceipt, StoreError>;
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
