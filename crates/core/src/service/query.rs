// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listing: fetch and decode the whole log.

use crate::codec;
use crate::record::{CommitRecord, Status};
use crate::store::LogStore;
use tracing::error;

/// Counters over the current log, for status reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
}

/// Read-only access to the decoded log.
#[derive(Clone)]
pub struct QueryService<S> {
    store: S,
}

impl<S: LogStore> QueryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All records, newest first.
    ///
    /// Never fails: store errors are logged and an empty list returned.
    /// Status filtering happens in the consuming layer.
    pub async fn list(&self) -> Vec<CommitRecord> {
        match self.store.read().await {
            Ok(snapshot) => codec::decode_log(&snapshot.content),
            Err(e) => {
                error!("failed to read log: {}", e);
                Vec::new()
            }
        }
    }

    /// Counters over the current log.
    pub async fn stats(&self) -> LogStats {
        let records = self.list().await;
        let pending = records
            .iter()
            .filter(|record| record.status == Status::Pending)
            .count();
        LogStats {
            total: records.len(),
            pending,
            approved: records.len() - pending,
        }
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
