// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation limits and fixed log constants.

/// Maximum commit message length in characters. Longer input is silently
/// truncated before encoding.
pub const MESSAGE_MAX_CHARS: usize = 140;

/// Length of a record hash: a random token, or the prefix of the change id
/// assigned by the store on write.
pub const HASH_LEN: usize = 7;

/// Alias used when a submission carries none.
pub const DEFAULT_ALIAS: &str = "anon";

/// Content used when the backing file does not exist yet.
pub const LOG_HEADER: &str = "# Tap Log\n\n";
