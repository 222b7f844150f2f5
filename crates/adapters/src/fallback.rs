// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote-then-local fallback combinator.
//!
//! Reads try the primary store first and fall back to the local copy only
//! when the primary is unreachable. Conflict, auth and API errors are not
//! fallback cases; they propagate. Writes always go to the primary.

use async_trait::async_trait;
use taplog_core::store::{LogSnapshot, LogStore, StoreError, WriteReceipt};
use tracing::warn;

#[derive(Clone)]
pub struct FallbackStore<P, F> {
    primary: P,
    fallback: Option<F>,
}

impl<P, F> FallbackStore<P, F> {
    pub fn new(primary: P, fallback: Option<F>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P: LogStore, F: LogStore> LogStore for FallbackStore<P, F> {
    async fn read(&self) -> Result<LogSnapshot, StoreError> {
        match self.primary.read().await {
            Ok(snapshot) => Ok(snapshot),
            Err(StoreError::Unavailable(reason)) => match &self.fallback {
                Some(fallback) => {
                    warn!("primary store unreachable ({}), using local copy", reason);
                    fallback.read().await
                }
                None => Err(StoreError::Unavailable(reason)),
            },
            Err(e) => Err(e),
        }
    }

    async fn write(
        &self,
        content: &str,
        version: Option<&str>,
        summary: &str,
    ) -> Result<WriteReceipt, StoreError> {
        self.primary.write(content, version, summary).await
    }
}

#[cfg(test)]
#[path = "fallback_tests.rs"]
mod tests;
