// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submit a new commit to the guestbook

use crate::client::DaemonClient;
use crate::error::TapError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use std::path::Path;

#[derive(clap::Args)]
pub struct SubmitArgs {
    /// Commit message (truncated to 140 characters)
    pub message: String,

    /// Author alias shown with the commit
    #[arg(long)]
    pub alias: Option<String>,

    /// Beer style tag (ipa, apa, stout, porter, lager, pilsner, amber, sour, craft)
    #[arg(long)]
    pub beer: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn handle(args: SubmitArgs, config: &Path) -> Result<()> {
    let client = DaemonClient::connect_or_start(config)
        .await
        .map_err(TapError::from_client)?;

    let record = client
        .submit(args.message, args.alias, args.beer)
        .await
        .map_err(TapError::from_client)?;

    output::print(&record, args.format);
    Ok(())
}
