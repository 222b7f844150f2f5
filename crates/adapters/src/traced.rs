// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrapper for consistent observability

use async_trait::async_trait;
use taplog_core::store::{LogSnapshot, LogStore, StoreError, WriteReceipt};

/// Wrapper that adds tracing to any LogStore
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: LogStore> LogStore for TracedStore<S> {
    async fn read(&self) -> Result<LogSnapshot, StoreError> {
        let span = tracing::info_span!("store.read");
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.read().await;
        let elapsed = start.elapsed();

        match &result {
            Ok(snapshot) => tracing::debug!(
                bytes = snapshot.content.len(),
                version = snapshot.version.as_deref().unwrap_or("none"),
                elapsed_ms = elapsed.as_millis() as u64,
                "read"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "read failed"
            ),
        }

        result
    }

    async fn write(
        &self,
        content: &str,
        version: Option<&str>,
        summary: &str,
    ) -> Result<WriteReceipt, StoreError> {
        let span = tracing::info_span!("store.write", summary);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.write(content, version, summary).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(receipt) => tracing::info!(
                bytes = content.len(),
                change_id = receipt.change_id.as_deref().unwrap_or("none"),
                elapsed_ms = elapsed.as_millis() as u64,
                "written"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "write failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
