// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::{FakeStore, StoreCall, StoreError};

const SECRET: &str = "barkeeper";

const LOG: &str = "# Tap Log\n\n\
    - **aaaaaaa** [ipa] ana: \"primero\" _(t1)_\n\
    - **bbbbbbb** [stout] (pending) leo: \"segundo\" _(t2)_\n";

fn service(store: &FakeStore) -> ApprovalService<FakeStore> {
    ApprovalService::new(store.clone(), SECRET)
}

#[tokio::test]
async fn approve_transitions_the_pending_line() {
    let store = FakeStore::with_content(LOG);
    let hash = service(&store).approve("bbbbbbb", SECRET).await.unwrap();
    assert_eq!(hash, "bbbbbbb");

    let content = store.content().unwrap();
    assert!(content.contains("- **bbbbbbb** [stout] leo: \"segundo\" _(t2)_\n"));
    assert!(!content.contains("(pending)"));
    // Untouched lines stay byte-identical
    assert!(content.contains("- **aaaaaaa** [ipa] ana: \"primero\" _(t1)_\n"));
}

#[tokio::test]
async fn wrong_secret_is_rejected_without_touching_the_store() {
    let store = FakeStore::with_content(LOG);
    let err = service(&store).approve("bbbbbbb", "nope").await.unwrap_err();
    assert!(matches!(err, ServiceError::Auth));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let store = FakeStore::with_content(LOG);
    let err = service(&store).approve("", SECRET).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = service(&store).approve("bbbbbbb", "").await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn short_hash_is_rejected() {
    let store = FakeStore::with_content(LOG);
    let err = service(&store).approve("bbb", SECRET).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn unknown_hash_is_not_found_and_leaves_file_unmodified() {
    let store = FakeStore::with_content(LOG);
    let err = service(&store).approve("zzzzzzz", SECRET).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    assert_eq!(store.content().unwrap(), LOG);
    assert_eq!(store.calls(), vec![StoreCall::Read]);
}

#[tokio::test]
async fn already_approved_hash_is_not_found() {
    let store = FakeStore::with_content(LOG);
    let err = service(&store).approve("aaaaaaa", SECRET).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(store.content().unwrap(), LOG);
}

#[tokio::test]
async fn write_conflict_surfaces_as_store_error() {
    let store = FakeStore::with_content(LOG);
    store.conflict_next_write();
    let err = service(&store).approve("bbbbbbb", SECRET).await.unwrap_err();
    assert!(matches!(err, ServiceError::Store(StoreError::Conflict)));
    assert_eq!(store.content().unwrap(), LOG);
}

#[tokio::test]
async fn second_approval_of_same_hash_fails() {
    let store = FakeStore::with_content(LOG);
    let service = service(&store);
    service.approve("bbbbbbb", SECRET).await.unwrap();

    let err = service.approve("bbbbbbb", SECRET).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
