// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commit records and their lifecycle states

use crate::tap::Tap;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a record.
///
/// Pending records are hidden from public display until approved. Approved is
/// terminal; a record never reverts to pending and is never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Approved,
}

impl Status {
    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Pending)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::Approved => write!(f, "approved"),
        }
    }
}

/// One guestbook commit entry.
///
/// `created_at` is captured as RFC 3339 UTC but carried as opaque text:
/// historical lines with hand-written dates still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub tap: Tap,
    pub alias: String,
    pub message: String,
    pub created_at: String,
    pub status: Status,
}

impl CommitRecord {
    /// Display caption in `git log --oneline` flavor, for API responses and
    /// listings. Never persisted.
    pub fn caption(&self) -> String {
        format!("{} [{}] {}", self.hash, self.tap, self.alias)
    }

    /// Copy of this record marked approved.
    pub fn approved(&self) -> Self {
        Self {
            status: Status::Approved,
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
