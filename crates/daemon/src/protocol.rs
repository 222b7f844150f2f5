// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol between the CLI and the daemon.
//!
//! Messages are 4-byte big-endian length-prefixed JSON, one request/response
//! pair per connection.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use taplog_core::record::{CommitRecord, Status};
use taplog_core::service::ServiceError;
use taplog_core::tap::Tap;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Protocol version, bumped on incompatible changes
pub const PROTOCOL_VERSION: &str = "1";

/// Default timeout for a single read or write on the socket
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// The log is a handful of kilobytes; anything bigger is bogus
const MAX_MESSAGE_SIZE: u32 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("message too large: {0} bytes")]
    TooLarge(u32),
    #[error("connection closed")]
    ConnectionClosed,
    #[error("timeout")]
    Timeout,
}

/// Requests accepted by the daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Ping,
    Hello {
        version: String,
    },
    /// Commit submission API
    Submit {
        message: String,
        #[serde(default)]
        alias: Option<String>,
        #[serde(default)]
        beer: Option<String>,
    },
    /// Approval API
    Approve {
        hash: String,
        secret: String,
    },
    /// Listing API
    List,
    Status,
    Shutdown,
}

/// Serialized view of a record, as the APIs return it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordView {
    pub hash: String,
    pub tap: Tap,
    pub alias: String,
    pub message: String,
    pub caption: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub status: Status,
}

impl From<&CommitRecord> for RecordView {
    fn from(record: &CommitRecord) -> Self {
        Self {
            hash: record.hash.clone(),
            tap: record.tap,
            alias: record.alias.clone(),
            message: record.message.clone(),
            caption: record.caption(),
            created_at: record.created_at.clone(),
            status: record.status,
        }
    }
}

impl std::fmt::Display for RecordView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {} {}: \"{}\" ({})",
            self.hash, self.tap, self.status, self.alias, self.message, self.created_at
        )
    }
}

/// Responses sent by the daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Pong,
    Hello {
        version: String,
    },
    Submitted {
        record: RecordView,
    },
    Approved {
        success: bool,
        hash: String,
    },
    Records {
        records: Vec<RecordView>,
    },
    Status {
        uptime_secs: u64,
        total: usize,
        pending: usize,
        approved: usize,
    },
    Error {
        code: u16,
        #[serde(rename = "error")]
        message: String,
    },
    ShuttingDown,
}

impl Response {
    /// Map a service failure to its error response.
    ///
    /// Store detail (tokens, URLs, HTTP bodies) never crosses this boundary;
    /// callers log it before converting.
    pub fn from_service_error(err: &ServiceError) -> Self {
        match err {
            ServiceError::Validation(message) => Response::Error {
                code: 400,
                message: message.clone(),
            },
            ServiceError::Auth => Response::Error {
                code: 403,
                message: "Secret inválido.".to_string(),
            },
            ServiceError::NotFound(_) => Response::Error {
                code: 404,
                message: "Commit no encontrado o ya está aprobado.".to_string(),
            },
            ServiceError::Store(_) => Response::Error {
                code: 500,
                message: "Error interno del servidor.".to_string(),
            },
        }
    }
}

/// Encode a message as raw JSON (no length prefix)
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode a message from raw JSON
pub fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Write a length-prefixed message
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> Result<(), ProtocolError> {
    let len = payload.len() as u32;
    if len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::TooLarge(len));
    }
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Read a length-prefixed message
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ProtocolError::ConnectionClosed);
        }
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_be_bytes(len_buf);
    if len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::TooLarge(len));
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await?;
    Ok(payload)
}

/// Read a request with a timeout
pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<Request, ProtocolError> {
    match tokio::time::timeout(timeout, read_message(reader)).await {
        Ok(payload) => decode(&payload?),
        Err(_) => Err(ProtocolError::Timeout),
    }
}

/// Write a request with a timeout
pub async fn write_request<W: AsyncWrite + Unpin>(
    writer: &mut W,
    request: &Request,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    let payload = encode(request)?;
    match tokio::time::timeout(timeout, write_message(writer, &payload)).await {
        Ok(result) => result,
        Err(_) => Err(ProtocolError::Timeout),
    }
}

/// Read a response with a timeout
pub async fn read_response<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<Response, ProtocolError> {
    match tokio::time::timeout(timeout, read_message(reader)).await {
        Ok(payload) => decode(&payload?),
        Err(_) => Err(ProtocolError::Timeout),
    }
}

/// Write a response with a timeout
pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    let payload = encode(response)?;
    match tokio::time::timeout(timeout, write_message(writer, &payload)).await {
        Ok(result) => result,
        Err(_) => Err(ProtocolError::Timeout),
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
