// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commit submission: validate, build a pending record, append.

use super::ServiceError;
use crate::clock::Clock;
use crate::codec;
use crate::hash::HashGen;
use crate::limits::{DEFAULT_ALIAS, HASH_LEN, MESSAGE_MAX_CHARS};
use crate::record::{CommitRecord, Status};
use crate::store::{LogStore, StoreError};
use crate::tap::Tap;
use chrono::SecondsFormat;
use tracing::{debug, error};

/// Raw submission input, straight from the API layer.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub message: String,
    pub alias: Option<String>,
    pub beer: Option<String>,
}

/// Accepts submissions and appends pending records to the backing file.
#[derive(Clone)]
pub struct CommitService<S, G, C> {
    store: S,
    hashes: G,
    clock: C,
}

impl<S: LogStore, G: HashGen, C: Clock> CommitService<S, G, C> {
    pub fn new(store: S, hashes: G, clock: C) -> Self {
        Self {
            store,
            hashes,
            clock,
        }
    }

    /// Submit a new commit.
    ///
    /// Persistence is best-effort: on store failure the caller still receives
    /// the pending record with its provisional hash and the error is only
    /// logged. When the store assigns a change id, its first seven characters
    /// replace the provisional hash in the response; the already-appended
    /// line keeps the provisional one.
    pub async fn submit(&self, submission: Submission) -> Result<CommitRecord, ServiceError> {
        let message = submission.message.trim();
        if message.is_empty() {
            return Err(ServiceError::Validation(
                "El mensaje del commit es requerido.".to_string(),
            ));
        }

        let alias = submission
            .alias
            .as_deref()
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .unwrap_or(DEFAULT_ALIAS);

        let mut record = CommitRecord {
            hash: self.hashes.next(),
            tap: Tap::from_input(submission.beer.as_deref()),
            alias: single_line(alias),
            message: truncate_chars(&single_line(message), MESSAGE_MAX_CHARS),
            created_at: self
                .clock
                .now()
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            status: Status::Pending,
        };

        match self.append(&record).await {
            Ok(Some(change_id)) if change_id.len() >= HASH_LEN => {
                record.hash = change_id[..HASH_LEN].to_string();
            }
            Ok(_) => {}
            Err(e) => {
                error!("failed to persist commit {}: {}", record.hash, e);
            }
        }

        Ok(record)
    }

    async fn append(&self, record: &CommitRecord) -> Result<Option<String>, StoreError> {
        let snapshot = self.store.read().await?;
        let content = codec::append_line(&snapshot.content, &codec::encode(record));
        let summary = format!("Add commit {}", record.hash);
        let receipt = self
            .store
            .write(&content, snapshot.version.as_deref(), &summary)
            .await?;
        debug!(
            "appended commit {} (change id {:?})",
            record.hash, receipt.change_id
        );
        Ok(receipt.change_id)
    }
}

// A newline would split the record across lines and corrupt the log.
fn single_line(input: &str) -> String {
    input
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn truncate_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

#[cfg(test)]
#[path = "commit_tests.rs"]
mod tests;
