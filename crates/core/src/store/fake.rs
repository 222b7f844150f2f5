// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fake store for testing

use super::{LogSnapshot, LogStore, StoreError, WriteReceipt};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Read,
    Write {
        content: String,
        version: Option<String>,
        summary: String,
    },
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Unavailable,
    Conflict,
}

#[derive(Default)]
struct Inner {
    /// `None` models an absent backing file
    content: Option<String>,
    version: u64,
    writes: u64,
    calls: Vec<StoreCall>,
    fail_next_read: Option<Failure>,
    fail_next_write: Option<Failure>,
}

/// Fake log store with call recording and failure injection.
///
/// The version token is a write counter, so a stale token is rejected the
/// same way the real store rejects a mismatched file version.
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<Inner>>,
}

impl FakeStore {
    /// Store with no backing file yet (first-write case)
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing content
    pub fn with_content(content: &str) -> Self {
        let store = Self::default();
        store.lock().content = Some(content.to_string());
        store
    }

    /// Current backing file content, if any
    pub fn content(&self) -> Option<String> {
        self.lock().content.clone()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> u64 {
        self.lock().writes
    }

    /// Make the next read fail as unreachable
    pub fn fail_next_read(&self) {
        self.lock().fail_next_read = Some(Failure::Unavailable);
    }

    /// Make the next write fail as unreachable
    pub fn fail_next_write(&self) {
        self.lock().fail_next_write = Some(Failure::Unavailable);
    }

    /// Make the next write fail with a version conflict
    pub fn conflict_next_write(&self) {
        self.lock().fail_next_write = Some(Failure::Conflict);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl LogStore for FakeStore {
    async fn read(&self) -> Result<LogSnapshot, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Read);

        if let Some(failure) = inner.fail_next_read.take() {
            return Err(injected(failure));
        }

        match &inner.content {
            Some(content) => Ok(LogSnapshot {
                content: content.clone(),
                version: Some(inner.version.to_string()),
            }),
            None => Ok(LogSnapshot::empty()),
        }
    }

    async fn write(
        &self,
        content: &str,
        version: Option<&str>,
        summary: &str,
    ) -> Result<WriteReceipt, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::Write {
            content: content.to_string(),
            version: version.map(str::to_string),
            summary: summary.to_string(),
        });

        if let Some(failure) = inner.fail_next_write.take() {
            return Err(injected(failure));
        }

        // Conditional write: the token must match the current version, and a
        // token-less write is only valid while the file is absent.
        let expected = inner.content.as_ref().map(|_| inner.version.to_string());
        if version != expected.as_deref() {
            return Err(StoreError::Conflict);
        }

        inner.content = Some(content.to_string());
        inner.version += 1;
        inner.writes += 1;

        // Sha-shaped change id with a distinct 7-char prefix per write
        let change_id = format!("fake{:03x}{}", inner.writes, "0".repeat(33));
        Ok(WriteReceipt {
            change_id: Some(change_id),
        })
    }
}

fn injected(failure: Failure) -> StoreError {
    match failure {
        Failure::Unavailable => StoreError::Unavailable("injected failure".to_string()),
        Failure::Conflict => StoreError::Conflict,
    }
}
