// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record hash generation abstractions

use crate::limits::HASH_LEN;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates provisional record hashes
pub trait HashGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// Random hash generator for production use.
///
/// Takes the first seven hex characters of a v4 UUID. Collisions are possible
/// and not checked; the log tolerates them.
#[derive(Clone, Default)]
pub struct RandomHashGen;

impl HashGen for RandomHashGen {
    fn next(&self) -> String {
        let simple = uuid::Uuid::new_v4().simple().to_string();
        simple[..HASH_LEN].to_string()
    }
}

/// Sequential hash generator for testing
#[derive(Clone)]
pub struct SequentialHashGen {
    counter: Arc<AtomicU64>,
}

impl SequentialHashGen {
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialHashGen {
    fn default() -> Self {
        Self::new()
    }
}

impl HashGen for SequentialHashGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{:07x}", n)
    }
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
