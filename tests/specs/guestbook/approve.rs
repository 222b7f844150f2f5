//! Approval flow

use crate::prelude::*;
use taplog_core::{ServiceError, Status};

#[tokio::test]
async fn submitted_commit_can_be_approved_and_stays_approved() {
    let h = harness();
    h.commits
        .submit(submission("Feliz año!", Some("ana"), Some("ipa")))
        .await
        .unwrap();

    // The listing carries the persisted hash, which is what the
    // administrator approves
    let listed = h.queries.list().await;
    assert_eq!(listed.len(), 1);
    let hash = listed[0].hash.clone();
    assert_eq!(listed[0].status, Status::Pending);

    let approved = h.approvals.approve(&hash, SECRET).await.unwrap();
    assert_eq!(approved, hash);

    let listed = h.queries.list().await;
    assert_eq!(listed[0].status, Status::Approved);
    assert_eq!(listed[0].message, "Feliz año!");
}

#[tokio::test]
async fn wrong_secret_is_rejected_and_the_file_is_untouched() {
    let h = harness();
    h.commits
        .submit(submission("hola", None, None))
        .await
        .unwrap();
    let before = h.store.content().unwrap();
    let hash = h.queries.list().await[0].hash.clone();

    let err = h.approvals.approve(&hash, "wrong").await.unwrap_err();
    assert!(matches!(err, ServiceError::Auth));
    assert_eq!(h.store.content().unwrap(), before);
}

#[tokio::test]
async fn approving_twice_fails_the_second_time() {
    let h = harness();
    h.commits
        .submit(submission("hola", None, None))
        .await
        .unwrap();
    let hash = h.queries.list().await[0].hash.clone();

    h.approvals.approve(&hash, SECRET).await.unwrap();
    let err = h.approvals.approve(&hash, SECRET).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn approving_an_unknown_hash_changes_nothing() {
    let h = harness();
    h.commits
        .submit(submission("hola", None, None))
        .await
        .unwrap();
    let before = h.store.content().unwrap();

    let err = h.approvals.approve("zzzzzzz", SECRET).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(h.store.content().unwrap(), before);
}

#[tokio::test]
async fn approval_leaves_every_other_line_byte_identical() {
    let h = harness();
    for msg in ["uno", "dos", "tres"] {
        h.commits
            .submit(submission(msg, Some("ana"), Some("stout")))
            .await
            .unwrap();
    }

    let before = h.store.content().unwrap();
    let target = h.queries.list().await[1].hash.clone();
    h.approvals.approve(&target, SECRET).await.unwrap();
    let after = h.store.content().unwrap();

    let changed: Vec<(&str, &str)> = before
        .split('\n')
        .zip(after.split('\n'))
        .filter(|(b, a)| b != a)
        .collect();
    assert_eq!(changed.len(), 1);
    assert!(changed[0].0.contains("(pending) "));
    assert_eq!(changed[0].0.replacen("(pending) ", "", 1), changed[0].1);
}
