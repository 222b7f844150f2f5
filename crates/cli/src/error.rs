// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use crate::client::ClientError;
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct TapError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TapError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Build a display error from a client failure.
    pub fn from_client(err: ClientError) -> Self {
        match err {
            ClientError::DaemonNotRunning => TapError::new("The taplog daemon is not running")
                .with_suggestion("Start it with: taplog daemon start")
                .with_suggestion("Check its status with: taplog daemon status"),
            ClientError::Rejected { message, .. } => TapError::new(message),
            ClientError::ConfigNotFound(path) => {
                TapError::new(format!("Config file not found: {}", path.display()))
                    .with_context("taplog looks for taplog.toml in the current directory")
                    .with_suggestion("Pass the config location with: taplog --config <path>")
            }
            ClientError::DaemonStartFailed(detail) => {
                TapError::new("The taplog daemon failed to start")
                    .with_context(detail)
                    .with_suggestion("Check the daemon log with: taplog daemon status")
            }
            other => TapError::new("Could not talk to the taplog daemon").with_source(other),
        }
    }
}

impl fmt::Display for TapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for TapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
