//! Conditional-write behavior under racing writers

use crate::prelude::*;
use taplog_core::{codec, CommitRecord, FakeStore, LogStore, Status, StoreError, Tap};

fn record(hash: &str, message: &str) -> CommitRecord {
    CommitRecord {
        hash: hash.to_string(),
        tap: Tap::Craft,
        alias: "anon".to_string(),
        message: message.to_string(),
        created_at: "2026-08-07T12:00:00Z".to_string(),
        status: Status::Pending,
    }
}

#[tokio::test]
async fn two_appends_from_the_same_snapshot_keep_exactly_one() {
    let store = FakeStore::with_content("# Tap Log\n\n");

    // Both writers read the same version token
    let snapshot_a = store.read().await.unwrap();
    let snapshot_b = store.read().await.unwrap();
    assert_eq!(snapshot_a.version, snapshot_b.version);

    let content_a = codec::append_line(
        &snapshot_a.content,
        &codec::encode(&record("aaaaaaa", "gano")),
    );
    let content_b = codec::append_line(
        &snapshot_b.content,
        &codec::encode(&record("bbbbbbb", "pierdo")),
    );

    store
        .write(&content_a, snapshot_a.version.as_deref(), "Add commit aaaaaaa")
        .await
        .unwrap();

    // The slower writer is rejected, not silently merged
    let err = store
        .write(&content_b, snapshot_b.version.as_deref(), "Add commit bbbbbbb")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict));

    let content = store.content().unwrap();
    assert!(content.contains("aaaaaaa"));
    assert!(!content.contains("bbbbbbb"));
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn losing_commit_submission_still_answers_the_caller() {
    let h = harness();
    h.commits
        .submit(submission("primero", None, None))
        .await
        .unwrap();

    // A commit that loses its conditional write degrades to the masked
    // best-effort response instead of corrupting the file
    h.store.conflict_next_write();
    let record = h
        .commits
        .submit(submission("carrera perdida", None, None))
        .await
        .unwrap();
    assert_eq!(record.status, Status::Pending);

    let content = h.store.content().unwrap();
    assert!(content.contains("primero"));
    assert!(!content.contains("carrera perdida"));
}

#[tokio::test]
async fn approval_lost_to_a_concurrent_writer_fails_cleanly() {
    let h = harness();
    h.commits
        .submit(submission("hola", None, None))
        .await
        .unwrap();
    let hash = h.queries.list().await[0].hash.clone();
    let before = h.store.content().unwrap();

    h.store.conflict_next_write();
    let err = h.approvals.approve(&hash, SECRET).await.unwrap_err();
    assert!(matches!(err, taplog_core::ServiceError::Store(_)));

    // No partial rewrite: the caller resubmits
    assert_eq!(h.store.content().unwrap(), before);
    let retry = h.approvals.approve(&hash, SECRET).await.unwrap();
    assert_eq!(retry, hash);
}
