// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client for CLI commands

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use taplog_daemon::lifecycle::Paths;
use taplog_daemon::protocol::{self, ProtocolError, RecordView, Request, Response};
use thiserror::Error;
use tokio::net::UnixStream;

// Timeout configuration (env vars in milliseconds)
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Timeout for protocol requests
pub fn timeout_ipc() -> Duration {
    parse_duration_ms("TAPLOG_TIMEOUT_IPC_MS").unwrap_or(Duration::from_secs(15))
}

/// Timeout for waiting for the daemon to start
pub fn timeout_connect() -> Duration {
    parse_duration_ms("TAPLOG_TIMEOUT_CONNECT_MS").unwrap_or(Duration::from_secs(5))
}

/// Timeout for waiting for the daemon process to exit
pub fn timeout_exit() -> Duration {
    parse_duration_ms("TAPLOG_TIMEOUT_EXIT_MS").unwrap_or(Duration::from_secs(2))
}

/// Polling interval for retries
pub fn poll_interval() -> Duration {
    parse_duration_ms("TAPLOG_POLL_INTERVAL_MS").unwrap_or(Duration::from_millis(50))
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("daemon not running")]
    DaemonNotRunning,

    #[error("failed to start daemon: {0}")]
    DaemonStartFailed(String),

    #[error("connection timeout waiting for daemon to start")]
    DaemonStartTimeout,

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error response from the daemon, with its HTTP-flavored code
    #[error("{message}")]
    Rejected { code: u16, message: String },

    #[error("unexpected response from daemon")]
    UnexpectedResponse,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
}

/// Daemon client
#[derive(Debug)]
pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    /// Connect to the daemon, auto-starting it if not running
    pub async fn connect_or_start(config_path: &Path) -> Result<Self, ClientError> {
        let paths = instance_paths(config_path)?;

        // Check version file before connecting - restart daemon on mismatch
        if let Ok(daemon_version) = std::fs::read_to_string(&paths.version_path) {
            let cli_version = env!("CARGO_PKG_VERSION");
            if daemon_version.trim() != cli_version {
                let _ = daemon_stop(config_path).await;
            }
        }

        match Self::connect(config_path) {
            Ok(client) => Ok(client),
            Err(ClientError::DaemonNotRunning) => {
                let child = start_daemon_background(&paths.config_path)?;
                Self::connect_with_retry(config_path, &paths, timeout_connect(), child).await
            }
            Err(e) => Err(wrap_with_startup_error(e, &paths)),
        }
    }

    /// Connect to an existing daemon (no auto-start)
    pub fn connect(config_path: &Path) -> Result<Self, ClientError> {
        let paths = instance_paths(config_path)?;

        if !paths.socket_path.exists() {
            return Err(ClientError::DaemonNotRunning);
        }

        Ok(Self {
            socket_path: paths.socket_path,
        })
    }

    async fn connect_with_retry(
        config_path: &Path,
        paths: &Paths,
        timeout: Duration,
        mut child: std::process::Child,
    ) -> Result<Self, ClientError> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            // Check if the daemon process exited early (startup failure)
            if let Ok(Some(status)) = child.try_wait() {
                let poll_start = Instant::now();
                while poll_start.elapsed() < timeout_exit() {
                    if let Some(err) = read_startup_error(paths) {
                        return Err(ClientError::DaemonStartFailed(err));
                    }
                    tokio::time::sleep(poll_interval()).await;
                }
                return Err(ClientError::DaemonStartFailed(format!(
                    "exited with {}",
                    status
                )));
            }

            match Self::connect(config_path) {
                Ok(client) => return Ok(client),
                Err(ClientError::DaemonNotRunning) => {
                    tokio::time::sleep(poll_interval()).await;
                }
                Err(e) => return Err(wrap_with_startup_error(e, paths)),
            }
        }

        Err(wrap_with_startup_error(
            ClientError::DaemonStartTimeout,
            paths,
        ))
    }

    /// Send a request and receive a response with specific timeouts
    async fn send_with_timeout(
        &self,
        request: Request,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Result<Response, ClientError> {
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (mut reader, mut writer) = stream.into_split();

        protocol::write_request(&mut writer, &request, write_timeout).await?;
        let response = protocol::read_response(&mut reader, read_timeout).await?;
        Ok(response)
    }

    /// Send a request and receive a response
    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        self.send_with_timeout(request, timeout_ipc(), timeout_ipc())
            .await
    }

    /// Submit a commit
    pub async fn submit(
        &self,
        message: String,
        alias: Option<String>,
        beer: Option<String>,
    ) -> Result<RecordView, ClientError> {
        match self
            .send(Request::Submit {
                message,
                alias,
                beer,
            })
            .await?
        {
            Response::Submitted { record } => Ok(record),
            Response::Error { code, message } => Err(ClientError::Rejected { code, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Approve a pending commit
    pub async fn approve(&self, hash: String, secret: String) -> Result<String, ClientError> {
        match self.send(Request::Approve { hash, secret }).await? {
            Response::Approved { hash, .. } => Ok(hash),
            Response::Error { code, message } => Err(ClientError::Rejected { code, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// List all records, newest first
    pub async fn list(&self) -> Result<Vec<RecordView>, ClientError> {
        match self.send(Request::List).await? {
            Response::Records { records } => Ok(records),
            Response::Error { code, message } => Err(ClientError::Rejected { code, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Get daemon status
    pub async fn status(&self) -> Result<(u64, usize, usize, usize), ClientError> {
        match self.send(Request::Status).await? {
            Response::Status {
                uptime_secs,
                total,
                pending,
                approved,
            } => Ok((uptime_secs, total, pending, approved)),
            Response::Error { code, message } => Err(ClientError::Rejected { code, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Request daemon shutdown
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        match self.send(Request::Shutdown).await? {
            Response::ShuttingDown => Ok(()),
            Response::Error { code, message } => Err(ClientError::Rejected { code, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Get daemon protocol version via Hello handshake
    pub async fn hello(&self) -> Result<String, ClientError> {
        match self
            .send(Request::Hello {
                version: env!("CARGO_PKG_VERSION").to_string(),
            })
            .await?
        {
            Response::Hello { version } => Ok(version),
            Response::Error { code, message } => Err(ClientError::Rejected { code, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }
}

/// Resolve the instance paths for a config file
fn instance_paths(config_path: &Path) -> Result<Paths, ClientError> {
    Paths::for_config(config_path)
        .map_err(|_| ClientError::ConfigNotFound(config_path.to_path_buf()))
}

/// Start the daemon in the background, returning the child process handle
fn start_daemon_background(config_path: &Path) -> Result<std::process::Child, ClientError> {
    let taplogd_path = find_taplogd_binary();

    Command::new(&taplogd_path)
        .arg(config_path)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| ClientError::DaemonStartFailed(e.to_string()))
}

/// Stop the daemon (graceful first, then forceful)
/// Returns true if the daemon was stopped, false if it wasn't running
pub async fn daemon_stop(config_path: &Path) -> Result<bool, ClientError> {
    let paths = instance_paths(config_path)?;

    let client = match DaemonClient::connect(config_path) {
        Ok(client) => client,
        Err(ClientError::DaemonNotRunning) => {
            cleanup_stale_pid(&paths);
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    // Try graceful shutdown (timeout handled by send())
    let shutdown_result = client.shutdown().await;

    if let Some(pid) = read_daemon_pid(&paths) {
        if shutdown_result.is_ok() {
            wait_for_exit(pid, timeout_exit()).await;
        }

        // Force kill if still running
        if process_exists(pid) {
            force_kill_daemon(pid);
            wait_for_exit(pid, timeout_exit()).await;
        }
    }

    cleanup_stale_pid(&paths);
    Ok(true)
}

/// Wait for a process to exit
async fn wait_for_exit(pid: u32, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if !process_exists(pid) {
            return true;
        }
        tokio::time::sleep(poll_interval()).await;
    }
    false
}

/// Find the taplogd binary
fn find_taplogd_binary() -> PathBuf {
    // Explicit override (used by tests to ensure correct binary)
    if let Ok(path) = std::env::var("TAPLOG_DAEMON_BINARY") {
        return PathBuf::from(path);
    }

    // Check current executable's directory
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("taplogd");
            if sibling.exists() {
                return sibling;
            }
        }
    }

    // Fall back to PATH lookup
    PathBuf::from("taplogd")
}

fn cleanup_stale_pid(paths: &Paths) {
    if paths.lock_path.exists() {
        let _ = std::fs::remove_file(&paths.lock_path);
    }
    if paths.socket_path.exists() {
        let _ = std::fs::remove_file(&paths.socket_path);
    }
}

/// Get the PID from the daemon PID file, if it exists
fn read_daemon_pid(paths: &Paths) -> Option<u32> {
    let content = std::fs::read_to_string(&paths.lock_path).ok()?;
    content.trim().parse::<u32>().ok()
}

/// Check if a process exists
fn process_exists(pid: u32) -> bool {
    // Use kill -0 to check if process exists without sending a signal
    Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Force kill a daemon process
fn force_kill_daemon(pid: u32) -> bool {
    Command::new("kill")
        .args(["-9", &pid.to_string()])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Startup marker prefix that the daemon writes to its log before anything
/// else. Full format: "--- taplogd: starting (pid: 12345) ---"
const STARTUP_MARKER_PREFIX: &str = "--- taplogd: starting (pid: ";

/// Read the most recent startup error from the daemon log, if any
fn read_startup_error(paths: &Paths) -> Option<String> {
    let content = std::fs::read_to_string(&paths.log_path).ok()?;

    // Find the last startup marker
    let start_pos = content.rfind(STARTUP_MARKER_PREFIX)?;
    let startup_log = &content[start_pos..];

    // Look for ERROR lines
    let errors: Vec<&str> = startup_log
        .lines()
        .filter(|line| line.contains("ERROR"))
        .collect();

    if errors.is_empty() {
        None
    } else {
        Some(errors.join("\n"))
    }
}

fn wrap_with_startup_error(err: ClientError, paths: &Paths) -> ClientError {
    // Don't double-wrap
    if matches!(err, ClientError::DaemonStartFailed(_)) {
        return err;
    }

    if let Some(startup_error) = read_startup_error(paths) {
        ClientError::DaemonStartFailed(startup_error)
    } else {
        err
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
