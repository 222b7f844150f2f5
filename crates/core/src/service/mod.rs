// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request services: commit submission, approval, listing.
//!
//! Services own the record-handling logic between the API layer and the
//! store adapter. They hold no shared in-process state; the remote backing
//! file is the sole durable state.

mod approve;
mod commit;
mod query;

pub use approve::ApprovalService;
pub use commit::{CommitService, Submission};
pub use query::{LogStats, QueryService};

use thiserror::Error;

/// Request-level failures, mapped to protocol error codes by the daemon.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed validation. The message is user-facing.
    #[error("{0}")]
    Validation(String),
    /// Approval credential mismatch.
    #[error("secret mismatch")]
    Auth,
    /// No pending line carries the hash.
    #[error("no pending record with hash {0}")]
    NotFound(String),
    /// Store failure surfaced to the caller.
    #[error("store error: {0}")]
    Store(#[from] crate::store::StoreError),
}
