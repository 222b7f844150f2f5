//! Listing flow

use crate::prelude::*;
use taplog_core::Status;

#[tokio::test]
async fn appending_then_listing_puts_the_new_record_first() {
    let h = harness();
    h.commits
        .submit(submission("primero", None, None))
        .await
        .unwrap();
    h.commits
        .submit(submission("segundo", None, None))
        .await
        .unwrap();

    let records = h.queries.list().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "segundo");
    assert_eq!(records[1].message, "primero");
}

#[tokio::test]
async fn listing_an_absent_file_is_empty_not_an_error() {
    let h = harness();
    assert!(h.queries.list().await.is_empty());
}

#[tokio::test]
async fn listing_swallows_store_failures() {
    let h = harness();
    h.commits
        .submit(submission("hola", None, None))
        .await
        .unwrap();

    h.store.fail_next_read();
    assert!(h.queries.list().await.is_empty());
}

#[tokio::test]
async fn pending_filtering_is_a_consumer_concern() {
    let h = harness();
    h.commits
        .submit(submission("visible tras aprobar", None, None))
        .await
        .unwrap();
    h.commits
        .submit(submission("aún pendiente", None, None))
        .await
        .unwrap();

    let first = h.queries.list().await[1].hash.clone();
    h.approvals.approve(&first, SECRET).await.unwrap();

    // The service returns everything; the display layer hides pending
    let records = h.queries.list().await;
    assert_eq!(records.len(), 2);

    let public: Vec<_> = records
        .iter()
        .filter(|record| record.status == Status::Approved)
        .collect();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].message, "visible tras aprobar");
}

#[tokio::test]
async fn hand_edited_garbage_lines_are_skipped() {
    let h = harness_with(taplog_core::FakeStore::with_content(
        "# Tap Log\n\n\
         - **aaaaaaa** [ipa] ana: \"ok\" _(t1)_\n\
         - someone edited this by hand\n\
         not even a list item\n",
    ));

    let records = h.queries.list().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].hash, "aaaaaaa");
}
