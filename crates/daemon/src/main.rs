// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! taplogd entry point.
//!
//! Loads configuration, sets up file logging, binds the socket and runs the
//! accept loop until a signal or a shutdown request arrives.

use std::path::PathBuf;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use taplog_daemon::lifecycle::{self, LifecycleError, Paths};
use taplog_daemon::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("taplog.toml")
    };

    let paths = Paths::for_config(&config_path)?;

    // Write startup marker to log (before tracing setup, so the CLI can find it)
    write_startup_marker(&paths)?;

    // Set up logging
    let log_guard = setup_logging(&paths)?;

    info!("starting taplogd for config: {}", paths.config_path.display());

    // Start daemon
    let mut daemon = match lifecycle::startup(&paths).await {
        Ok(daemon) => daemon,
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not
            // flush in time)
            write_startup_error(&paths, &e);
            error!("failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(
        "daemon ready, listening on {}",
        paths.socket_path.display()
    );

    // Signal ready for the parent process (CLI waiting for startup)
    println!("READY");

    // Main accept loop
    loop {
        tokio::select! {
            result = daemon.listener.accept() => {
                match result {
                    Ok((stream, _)) => {
                        if let Err(e) = server::handle_connection(&mut daemon, stream).await {
                            error!("error handling connection: {}", e);
                        }
                    }
                    Err(e) => {
                        error!("error accepting connection: {}", e);
                    }
                }
            }

            // Graceful shutdown on SIGTERM
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down...");
                daemon.shutdown().await?;
                break;
            }

            // Graceful shutdown on SIGINT
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down...");
                daemon.shutdown().await?;
                break;
            }
        }

        // Check if shutdown was requested via the protocol
        if daemon.shutdown_requested {
            info!("shutdown requested, shutting down...");
            daemon.shutdown().await?;
            break;
        }
    }

    info!("daemon stopped");
    Ok(())
}

/// Startup marker prefix written to log before anything else.
/// The CLI uses this to find where the current startup attempt begins.
/// Full format: "--- taplogd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- taplogd: starting (pid: ";

/// Write startup marker to log file (appends to existing log)
fn write_startup_marker(paths: &Paths) -> Result<(), LifecycleError> {
    use std::io::Write;

    if let Some(parent) = paths.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_path)?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;

    Ok(())
}

/// Write startup error synchronously to log file.
/// This ensures the error is visible to the CLI even if the process exits
/// quickly.
fn write_startup_error(paths: &Paths, error: &LifecycleError) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start daemon: {}", error);
}

fn setup_logging(
    paths: &Paths,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Create log directory if needed
    if let Some(parent) = paths.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Set up file appender
    let file_appender = tracing_appender::rolling::never(
        paths.log_path.parent().ok_or(LifecycleError::NoStateDir)?,
        paths
            .log_path
            .file_name()
            .ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Set up subscriber with env filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
