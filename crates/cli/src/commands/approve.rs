// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approve a pending commit

use crate::client::DaemonClient;
use crate::error::TapError;
use anyhow::Result;
use std::path::Path;
use taplog_core::config::ADMIN_SECRET_ENV;

#[derive(clap::Args)]
pub struct ApproveArgs {
    /// Hash of the pending commit
    pub hash: String,

    /// Administrator secret (falls back to TAPLOG_ADMIN_SECRET)
    #[arg(long)]
    pub secret: Option<String>,
}

pub async fn handle(args: ApproveArgs, config: &Path) -> Result<()> {
    let secret = match args.secret.or_else(|| std::env::var(ADMIN_SECRET_ENV).ok()) {
        Some(secret) => secret,
        None => {
            return Err(TapError::new("No administrator secret given")
                .with_suggestion("Pass it with: taplog approve <hash> --secret <secret>")
                .with_suggestion(format!("Or export it as {}", ADMIN_SECRET_ENV))
                .into());
        }
    };

    let client = DaemonClient::connect_or_start(config)
        .await
        .map_err(TapError::from_client)?;

    let hash = client
        .approve(args.hash, secret)
        .await
        .map_err(TapError::from_client)?;

    println!("Approved: {}", hash);
    Ok(())
}
