// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! taplog - Tap Log CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod completions;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{approve, daemon, list, status, submit};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taplog",
    version,
    about = "Tap Log - a commit guestbook on tap"
)]
struct Cli {
    /// Path to the guestbook config file
    #[arg(long, global = true, default_value = "taplog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new commit to the guestbook
    Submit(submit::SubmitArgs),
    /// Approve a pending commit
    Approve(approve::ApproveArgs),
    /// List commits, newest first
    List(list::ListArgs),
    /// Show daemon and log status
    Status(status::StatusArgs),
    /// Daemon management
    Daemon(daemon::DaemonArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Submit(args) => submit::handle(args, &cli.config).await,
        Commands::Approve(args) => approve::handle(args, &cli.config).await,
        Commands::List(args) => list::handle(args, &cli.config).await,
        Commands::Status(args) => status::handle(args, &cli.config).await,
        Commands::Daemon(args) => daemon::handle(args, &cli.config).await,
        Commands::Completions(args) => {
            completions::generate_completions::<Cli>(args.shell);
            Ok(())
        }
    }
}
