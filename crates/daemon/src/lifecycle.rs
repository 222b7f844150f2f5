// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, shutdown.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fs2::FileExt;
use sha2::{Digest, Sha256};
use taplog_adapters::{FallbackStore, GithubStore, LocalStore, TracedStore};
use taplog_core::clock::SystemClock;
use taplog_core::config::{Config, ConfigError};
use taplog_core::hash::RandomHashGen;
use taplog_core::service::{ApprovalService, CommitService, QueryService};
use taplog_core::store::LogStore;
use thiserror::Error;
use tokio::net::UnixListener;
use tracing::info;

/// Store stack the daemon runs with: GitHub behind tracing, local fallback
pub type DaemonStore = FallbackStore<TracedStore<GithubStore>, LocalStore>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("config file not found: {}: {}", .0.display(), .1)]
    ConfigNotFound(PathBuf, std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not determine state directory")]
    NoStateDir,
    #[error("another daemon already holds the lock: {0}")]
    LockFailed(std::io::Error),
    #[error("failed to bind socket {}: {}", .0.display(), .1)]
    BindFailed(PathBuf, std::io::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem locations for one daemon instance, derived from the config
/// file path so separate guestbooks get separate daemons.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_path: PathBuf,
    pub socket_path: PathBuf,
    pub lock_path: PathBuf,
    pub version_path: PathBuf,
    pub log_path: PathBuf,
}

impl Paths {
    pub fn for_config(config_path: &Path) -> Result<Self, LifecycleError> {
        let canonical = config_path
            .canonicalize()
            .map_err(|e| LifecycleError::ConfigNotFound(config_path.to_path_buf(), e))?;

        let hash = instance_hash(&canonical);
        let state_dir = state_dir()?.join("instances").join(&hash);
        let socket_dir = socket_dir()?;

        Ok(Self {
            config_path: canonical,
            socket_path: socket_dir.join(format!("{}.sock", hash)),
            lock_path: state_dir.join("daemon.pid"),
            version_path: state_dir.join("daemon.version"),
            log_path: state_dir.join("daemon.log"),
        })
    }
}

/// The three request services sharing one store stack
pub struct Services<S: LogStore> {
    pub commits: CommitService<S, RandomHashGen, SystemClock>,
    pub approvals: ApprovalService<S>,
    pub queries: QueryService<S>,
}

impl<S: LogStore> Services<S> {
    pub fn new(store: S, admin_secret: impl Into<String>) -> Self {
        Self {
            commits: CommitService::new(store.clone(), RandomHashGen, SystemClock),
            approvals: ApprovalService::new(store.clone(), admin_secret),
            queries: QueryService::new(store),
        }
    }
}

/// Daemon state during operation
pub struct DaemonState {
    pub paths: Paths,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Unix socket listener
    pub listener: UnixListener,
    /// Request services over the configured store stack
    pub services: Services<DaemonStore>,
    /// When the daemon started
    pub start_time: Instant,
    /// Shutdown requested flag
    pub shutdown_requested: bool,
}

impl DaemonState {
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        if self.paths.socket_path.exists() {
            std::fs::remove_file(&self.paths.socket_path)?;
        }
        if self.paths.lock_path.exists() {
            std::fs::remove_file(&self.paths.lock_path)?;
        }
        info!("daemon shut down");
        Ok(())
    }
}

/// Start the daemon
pub async fn startup(paths: &Paths) -> Result<DaemonState, LifecycleError> {
    match startup_inner(paths).await {
        Ok(state) => Ok(state),
        Err(e) => {
            cleanup_on_failure(paths);
            Err(e)
        }
    }
}

async fn startup_inner(paths: &Paths) -> Result<DaemonState, LifecycleError> {
    // 1. Create state directories (needed for socket, lock, log)
    if let Some(parent) = paths.lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if let Some(parent) = paths.socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // 2. Acquire lock file FIRST - prevents races
    let lock_file = File::create(&paths.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file
    use std::io::Write;
    let mut lock_file = lock_file;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    // Write version file
    std::fs::write(&paths.version_path, env!("CARGO_PKG_VERSION"))?;

    // 3. Load configuration BEFORE binding the socket (fail fast, don't
    //    accept connections with an unusable store)
    let config = Config::load(&paths.config_path)?;
    let services = Services::new(build_store(&config), config.admin_secret);

    // 4. Remove stale socket and bind (LAST - only after validation passes)
    if paths.socket_path.exists() {
        std::fs::remove_file(&paths.socket_path)?;
    }
    let listener = UnixListener::bind(&paths.socket_path)
        .map_err(|e| LifecycleError::BindFailed(paths.socket_path.clone(), e))?;

    Ok(DaemonState {
        paths: paths.clone(),
        lock_file,
        listener,
        services,
        start_time: Instant::now(),
        shutdown_requested: false,
    })
}

fn build_store(config: &Config) -> DaemonStore {
    let github = GithubStore::new(config.store.clone(), config.github_token.clone());
    let local = config.store.local_fallback.as_ref().map(LocalStore::new);
    FallbackStore::new(TracedStore::new(github), local)
}

fn cleanup_on_failure(paths: &Paths) {
    let _ = std::fs::remove_file(&paths.socket_path);
    let _ = std::fs::remove_file(&paths.lock_path);
}

/// Compute instance hash for unique daemon directory
fn instance_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let result = hasher.finalize();
    // Take first 16 chars of hex digest
    result[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Get the state directory for taplog (logs, pid, version files)
fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("taplog"));
    }
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("taplog"))
        .ok_or(LifecycleError::NoStateDir)
}

/// Get the socket directory for taplog
///
/// Uses /tmp/taplog by default to keep paths short (macOS SUN_LEN = 104).
/// Can be overridden with TAPLOG_SOCKET_DIR for testing.
fn socket_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("TAPLOG_SOCKET_DIR") {
        return Ok(PathBuf::from(dir));
    }
    Ok(PathBuf::from("/tmp/taplog"))
}
