// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote log store backed by the GitHub repository-contents API.
//!
//! The backing file's blob `sha` is the version token: a `PUT` carrying a
//! stale `sha` is rejected by GitHub, which is the only concurrency control
//! this system has. The commit sha returned on write is the assigned change
//! id whose prefix may replace a record's provisional hash.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use taplog_core::config::StoreConfig;
use taplog_core::store::{LogSnapshot, LogStore, StoreError, WriteReceipt};
use tracing::debug;
use ureq::Agent;

const API_ROOT: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github+json";
// GitHub rejects requests without a User-Agent
const USER_AGENT: &str = concat!("taplog/", env!("CARGO_PKG_VERSION"));

/// Log store speaking the GitHub contents API.
#[derive(Clone)]
pub struct GithubStore {
    agent: Agent,
    config: StoreConfig,
    token: Option<String>,
}

impl GithubStore {
    /// Network timeouts are owned here, per the store configuration.
    pub fn new(config: StoreConfig, token: Option<String>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();
        Self {
            agent,
            config,
            token,
        }
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            API_ROOT, self.config.owner, self.config.repo, self.config.path
        )
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct WritePayload<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    commit: Option<CommitInfo>,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    sha: String,
}

#[async_trait]
impl LogStore for GithubStore {
    async fn read(&self) -> Result<LogSnapshot, StoreError> {
        let url = format!("{}?ref={}", self.contents_url(), self.config.branch);
        let mut request = self
            .agent
            .get(&url)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT);
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", &auth);
        }

        let mut response = match request.call() {
            Ok(response) => response,
            // The backing file does not exist yet: first-write case
            Err(ureq::Error::StatusCode(404)) => {
                debug!("backing file absent, serving header-only default");
                return Ok(LogSnapshot::empty());
            }
            Err(ureq::Error::StatusCode(status @ (401 | 403))) => {
                return Err(StoreError::Auth(format!("read rejected with {}", status)));
            }
            Err(ureq::Error::StatusCode(status)) => {
                return Err(StoreError::Api {
                    status,
                    message: "contents read failed".to_string(),
                });
            }
            Err(e) => return Err(StoreError::Unavailable(e.to_string())),
        };

        let payload: ContentsResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(LogSnapshot {
            content: decode_content(&payload.content)?,
            version: Some(payload.sha),
        })
    }

    async fn write(
        &self,
        content: &str,
        version: Option<&str>,
        summary: &str,
    ) -> Result<WriteReceipt, StoreError> {
        let auth = self
            .auth_header()
            .ok_or_else(|| StoreError::Auth("no write credential configured".to_string()))?;

        let payload = WritePayload {
            message: summary,
            content: BASE64.encode(content.as_bytes()),
            branch: &self.config.branch,
            sha: version,
        };

        let result = self
            .agent
            .put(&self.contents_url())
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .header("Authorization", &auth)
            .send_json(&payload);

        let mut response = match result {
            Ok(response) => response,
            // GitHub signals a stale sha with 409 (and 422 on some paths)
            Err(ureq::Error::StatusCode(409 | 422)) => return Err(StoreError::Conflict),
            Err(ureq::Error::StatusCode(status @ (401 | 403))) => {
                return Err(StoreError::Auth(format!("write rejected with {}", status)));
            }
            Err(ureq::Error::StatusCode(status)) => {
                return Err(StoreError::Api {
                    status,
                    message: "contents write failed".to_string(),
                });
            }
            Err(e) => return Err(StoreError::Unavailable(e.to_string())),
        };

        let payload: WriteResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(WriteReceipt {
            change_id: payload.commit.map(|commit| commit.sha),
        })
    }
}

// GitHub wraps base64 content in newlines
fn decode_content(encoded: &str) -> Result<String, StoreError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| StoreError::Parse(format!("invalid base64 content: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Parse(format!("content is not UTF-8: {}", e)))
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
