// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon management

use crate::client::{self, DaemonClient};
use crate::error::TapError;
use anyhow::Result;
use std::path::Path;

#[derive(clap::Args)]
pub struct DaemonArgs {
    #[command(subcommand)]
    pub command: DaemonCommand,
}

#[derive(clap::Subcommand)]
pub enum DaemonCommand {
    /// Start the daemon if it is not already running
    Start,
    /// Stop a running daemon
    Stop,
    /// Show whether the daemon is running
    Status,
}

pub async fn handle(args: DaemonArgs, config: &Path) -> Result<()> {
    match args.command {
        DaemonCommand::Start => {
            DaemonClient::connect_or_start(config)
                .await
                .map_err(TapError::from_client)?;
            println!("Daemon running");
            Ok(())
        }

        DaemonCommand::Stop => {
            let stopped = client::daemon_stop(config)
                .await
                .map_err(TapError::from_client)?;
            if stopped {
                println!("Daemon stopped");
            } else {
                println!("Daemon was not running");
            }
            Ok(())
        }

        DaemonCommand::Status => match DaemonClient::connect(config) {
            Ok(client) => {
                let version = client.hello().await.map_err(TapError::from_client)?;
                println!("Daemon running (protocol v{})", version);
                Ok(())
            }
            Err(client::ClientError::DaemonNotRunning) => {
                println!("Daemon not running");
                Ok(())
            }
            Err(e) => Err(TapError::from_client(e).into()),
        },
    }
}
