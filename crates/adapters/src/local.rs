// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only local copy of the backing file.
//!
//! Serves display reads when the remote store is unreachable. It never
//! carries a version token and refuses writes, so it can never clobber the
//! remote file.

use async_trait::async_trait;
use std::path::PathBuf;
use taplog_core::store::{LogSnapshot, LogStore, StoreError, WriteReceipt};

#[derive(Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LogStore for LocalStore {
    async fn read(&self) -> Result<LogSnapshot, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(LogSnapshot {
                content,
                version: None,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LogSnapshot::empty()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn write(
        &self,
        _content: &str,
        _version: Option<&str>,
        _summary: &str,
    ) -> Result<WriteReceipt, StoreError> {
        Err(StoreError::ReadOnly)
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
