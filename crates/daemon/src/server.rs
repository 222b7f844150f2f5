// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Socket server and connection handling.

use thiserror::Error;
use tokio::net::UnixStream;
use tracing::{debug, error};

use crate::lifecycle::{DaemonState, Services};
use crate::protocol::{
    self, RecordView, Request, Response, DEFAULT_TIMEOUT, PROTOCOL_VERSION,
};
use taplog_core::service::Submission;
use taplog_core::store::LogStore;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),
    #[error("request timeout")]
    Timeout,
}

/// Handle a single client connection
pub async fn handle_connection(
    daemon: &mut DaemonState,
    stream: UnixStream,
) -> Result<(), ServerError> {
    let (mut reader, mut writer) = stream.into_split();

    let request = match protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await {
        Ok(request) => request,
        Err(protocol::ProtocolError::Timeout) => {
            error!("request read timeout");
            return Err(ServerError::Timeout);
        }
        Err(protocol::ProtocolError::ConnectionClosed) => {
            debug!("client disconnected before sending request");
            return Ok(());
        }
        Err(e) => {
            error!("failed to read request: {}", e);
            return Err(ServerError::Protocol(e));
        }
    };

    debug!("received request: {:?}", redacted(&request));

    let uptime_secs = daemon.start_time.elapsed().as_secs();
    let response = handle_request(
        &daemon.services,
        uptime_secs,
        &mut daemon.shutdown_requested,
        request,
    )
    .await;

    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT)
        .await
        .map_err(ServerError::Protocol)?;

    Ok(())
}

/// Handle a single request and return a response
pub async fn handle_request<S: LogStore>(
    services: &Services<S>,
    uptime_secs: u64,
    shutdown_requested: &mut bool,
    request: Request,
) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version: _ } => Response::Hello {
            version: PROTOCOL_VERSION.to_string(),
        },

        Request::Submit {
            message,
            alias,
            beer,
        } => {
            let submission = Submission {
                message,
                alias,
                beer,
            };
            match services.commits.submit(submission).await {
                Ok(record) => Response::Submitted {
                    record: RecordView::from(&record),
                },
                Err(e) => {
                    error!("submit failed: {}", e);
                    Response::from_service_error(&e)
                }
            }
        }

        Request::Approve { hash, secret } => {
            match services.approvals.approve(&hash, &secret).await {
                Ok(hash) => Response::Approved {
                    success: true,
                    hash,
                },
                Err(e) => {
                    error!("approve failed for {}: {}", hash, e);
                    Response::from_service_error(&e)
                }
            }
        }

        Request::List => {
            let records = services.queries.list().await;
            Response::Records {
                records: records.iter().map(RecordView::from).collect(),
            }
        }

        Request::Status => {
            let stats = services.queries.stats().await;
            Response::Status {
                uptime_secs,
                total: stats.total,
                pending: stats.pending,
                approved: stats.approved,
            }
        }

        Request::Shutdown => {
            *shutdown_requested = true;
            Response::ShuttingDown
        }
    }
}

// Approve carries the admin credential; never log it.
fn redacted(request: &Request) -> Request {
    match request {
        Request::Approve { hash, secret: _ } => Request::Approve {
            hash: hash.clone(),
            secret: "<redacted>".to_string(),
        },
        other => other.clone(),
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
