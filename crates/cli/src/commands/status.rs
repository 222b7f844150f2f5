// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Show daemon and log status

use crate::client::DaemonClient;
use crate::error::TapError;
use anyhow::Result;
use std::path::Path;

#[derive(clap::Args)]
pub struct StatusArgs {}

pub async fn handle(_args: StatusArgs, config: &Path) -> Result<()> {
    let client = DaemonClient::connect_or_start(config)
        .await
        .map_err(TapError::from_client)?;

    let (uptime_secs, total, pending, approved) =
        client.status().await.map_err(TapError::from_client)?;

    println!("Daemon uptime: {}s", uptime_secs);
    println!("Records: {} ({} pending, {} approved)", total, pending, approved);
    Ok(())
}
