// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! List commits, newest first

use crate::client::DaemonClient;
use crate::error::TapError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use std::path::Path;
use taplog_core::record::Status;

#[derive(clap::Args)]
pub struct ListArgs {
    /// Show only pending commits
    #[arg(long, conflicts_with = "approved")]
    pub pending: bool,

    /// Show only approved commits
    #[arg(long, conflicts_with = "pending")]
    pub approved: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn handle(args: ListArgs, config: &Path) -> Result<()> {
    let client = DaemonClient::connect_or_start(config)
        .await
        .map_err(TapError::from_client)?;

    let mut records = client.list().await.map_err(TapError::from_client)?;

    // The daemon returns everything; status filtering is a client concern
    if args.pending {
        records.retain(|record| record.status == Status::Pending);
    } else if args.approved {
        records.retain(|record| record.status == Status::Approved);
    }

    if records.is_empty() && matches!(args.format, OutputFormat::Text) {
        println!("Nothing on tap yet.");
        return Ok(());
    }

    output::print_list(&records, args.format);
    Ok(())
}
