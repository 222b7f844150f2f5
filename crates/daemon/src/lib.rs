// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! taplog-daemon (taplogd)
//!
//! Background process that owns the store client and serves the commit,
//! approval and listing APIs over a Unix socket.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod lifecycle;
pub mod protocol;
pub mod server;

pub use protocol::{
    ProtocolError, RecordView, Request, Response, DEFAULT_TIMEOUT, PROTOCOL_VERSION,
};
