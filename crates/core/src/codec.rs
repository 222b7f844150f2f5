// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record line codec: the persisted wire format.
//!
//! One record is one Markdown list item:
//!
//! ```text
//! - **a1b2c3d** [ipa] (pending) ana: "Feliz año!" _(2026-08-07T12:00:00Z)_
//! ```
//!
//! The `(pending) ` token is present only for unapproved records. Its absence
//! decodes as approved, which also covers lines written by the older format
//! that had no lifecycle marker at all.
//!
//! The format does not escape delimiters. An alias containing `: "` or a
//! message containing `" _(` corrupts decoding of that line. Known limitation,
//! kept for compatibility with historical entries; submission sanitizes
//! newlines but leaves quotes alone.

use crate::record::{CommitRecord, Status};
use crate::tap::Tap;
use regex::Regex;
use std::sync::LazyLock;

// Captures: hash, tap, optional pending marker, alias, message, created_at
#[allow(clippy::expect_used)]
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^- \*\*([A-Za-z0-9]+)\*\* \[([^\]]*)\] (\(pending\) )?(.*?): "(.*?)" _\((.*)\)_$"#)
        .expect("constant regex pattern is valid")
});

// Everything up to and including the bracketed tap, then the marker to drop
#[allow(clippy::expect_used)]
static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(- \*\*[A-Za-z0-9]+\*\* \[[^\]]*\] )\(pending\) (.*)$")
        .expect("constant regex pattern is valid")
});

/// Encode a record as its canonical line.
pub fn encode(record: &CommitRecord) -> String {
    let marker = if record.status.is_pending() {
        "(pending) "
    } else {
        ""
    };
    format!(
        "- **{}** [{}] {}{}: \"{}\" _({})_",
        record.hash, record.tap, marker, record.alias, record.message, record.created_at
    )
}

/// Decode one line.
///
/// Returns `None` for anything that does not match the canonical pattern:
/// header lines, blank lines, hand-edited garbage. A successful match is the
/// sole source of truth for `status`.
pub fn decode(line: &str) -> Option<CommitRecord> {
    let caps = LINE_PATTERN.captures(line)?;
    let status = if caps.get(3).is_some() {
        Status::Pending
    } else {
        Status::Approved
    };
    Some(CommitRecord {
        hash: caps[1].to_string(),
        tap: Tap::parse(&caps[2]).unwrap_or(Tap::Craft),
        alias: caps[4].to_string(),
        message: caps[5].to_string(),
        created_at: caps[6].to_string(),
        status,
    })
}

/// Decode a whole backing file.
///
/// Only list-item lines are considered, invalid lines are dropped, and the
/// result is reversed so the most recently appended record comes first.
/// Callers rely on that order and must not re-sort.
pub fn decode_log(content: &str) -> Vec<CommitRecord> {
    let mut records: Vec<CommitRecord> = content
        .lines()
        .filter(|line| line.starts_with("- "))
        .filter_map(decode)
        .collect();
    records.reverse();
    records
}

/// Append an encoded line to the backing content, normalizing the trailing
/// newline so the file stays one record per line.
pub fn append_line(content: &str, line: &str) -> String {
    let mut out = content.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(line);
    out.push('\n');
    out
}

/// Rewrite the pending line for `hash` to its approved form, leaving every
/// other line byte-identical.
///
/// Returns `None` when no pending line carries the hash: wrong hash, already
/// approved, or a file inconsistency.
pub fn approve_in_log(content: &str, hash: &str) -> Option<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let idx = lines.iter().position(|line| {
        decode(line).is_some_and(|r| r.status.is_pending() && r.hash == hash)
    })?;
    lines[idx] = approve_line(&lines[idx])?;
    Some(lines.join("\n"))
}

// Drops the pending marker from a single line. Works on the raw text so taps
// outside the known set survive unchanged.
fn approve_line(line: &str) -> Option<String> {
    let caps = MARKER_PATTERN.captures(line)?;
    Some(format!("{}{}", &caps[1], &caps[2]))
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
