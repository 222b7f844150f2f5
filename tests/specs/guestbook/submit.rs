//! Submission flow

use crate::prelude::*;
use taplog_core::{ServiceError, Status, Tap};

#[tokio::test]
async fn submitting_a_commit_yields_a_pending_record() {
    let h = harness();
    let record = h
        .commits
        .submit(submission("Feliz año!", Some("ana"), Some("ipa")))
        .await
        .unwrap();

    assert_eq!(record.tap, Tap::Ipa);
    assert_eq!(record.status, Status::Pending);
    assert_eq!(record.message, "Feliz año!");
    assert_eq!(record.alias, "ana");
    assert_eq!(record.hash.len(), 7);
}

#[tokio::test]
async fn empty_message_is_rejected_and_nothing_is_written() {
    let h = harness();
    let err = h
        .commits
        .submit(submission("", None, None))
        .await
        .unwrap_err();

    match err {
        ServiceError::Validation(message) => {
            assert_eq!(message, "El mensaje del commit es requerido.");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(h.store.write_count(), 0);
    assert!(h.store.content().is_none());
}

#[tokio::test]
async fn unknown_beer_coerces_and_known_beer_passes_through() {
    let h = harness();
    let craft = h
        .commits
        .submit(submission("una", None, Some("quadrupel")))
        .await
        .unwrap();
    assert_eq!(craft.tap, Tap::Craft);

    let ipa = h
        .commits
        .submit(submission("otra", None, Some("IPA")))
        .await
        .unwrap();
    assert_eq!(ipa.tap, Tap::Ipa);
}

#[tokio::test]
async fn long_message_is_truncated_to_140_characters() {
    let h = harness();
    let record = h
        .commits
        .submit(submission(&"x".repeat(300), None, None))
        .await
        .unwrap();
    assert_eq!(record.message.chars().count(), 140);
}

#[tokio::test]
async fn store_failure_still_returns_a_pending_record() {
    let h = harness();
    h.store.fail_next_write();

    let record = h
        .commits
        .submit(submission("best effort", None, None))
        .await
        .unwrap();

    // Persistence failed, but the caller sees a valid record anyway
    assert_eq!(record.status, Status::Pending);
    assert_eq!(record.hash.len(), 7);
    assert_eq!(h.store.write_count(), 0);
}
