#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `FileKeyValueStorage` and the credential store on top of it.

use std::sync::Arc;

use ssid_connect_app::adapters::{FileKeyValueStorage, STORE_FILE_NAME};
use ssid_connect_core::error::CoreError;
use ssid_connect_core::store::KeyValueCredentialStore;
use ssid_connect_core::traits::{CredentialStore, KeyValueStorage};
use ssid_connect_core::types::NetworkCredential;

// ===== Helpers =====

fn create_test_storage() -> (FileKeyValueStorage, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let storage = FileKeyValueStorage::new(tmp.path());
    (storage, tmp)
}

fn network(id: &str, ssid: &str, password: &str) -> NetworkCredential {
    NetworkCredential {
        id: id.to_string(),
        ssid: ssid.to_string(),
        password: password.to_string(),
    }
}

// ===== KeyValueStorage Tests =====

#[tokio::test]
async fn missing_file_reads_as_empty() {
    let (storage, tmp) = create_test_storage();

    assert_eq!(storage.get_item("ssidList").await.unwrap(), None);
    assert!(!tmp.path().join(STORE_FILE_NAME).exists());
}

#[tokio::test]
async fn set_then_get() {
    let (storage, _tmp) = create_test_storage();

    storage.set_item("a", "1").await.unwrap();
    storage.set_item("b", "two").await.unwrap();
    storage.set_item("a", "3").await.unwrap();

    assert_eq!(storage.get_item("a").await.unwrap().as_deref(), Some("3"));
    assert_eq!(storage.get_item("b").await.unwrap().as_deref(), Some("two"));
    assert_eq!(storage.get_item("c").await.unwrap(), None);
}

#[tokio::test]
async fn creates_missing_parent_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = FileKeyValueStorage::new(tmp.path().join("nested").join("dir"));

    storage.set_item("k", "v").await.unwrap();

    assert!(storage.path().exists());
}

#[tokio::test]
async fn no_temp_file_left_after_write() {
    let (storage, tmp) = create_test_storage();

    storage.set_item("k", "v").await.unwrap();

    let names: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![STORE_FILE_NAME.to_string()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_writers_never_corrupt_the_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(STORE_FILE_NAME);

    let mut handles = Vec::new();
    for writer in 0..4 {
        let storage = FileKeyValueStorage::with_file(&path);
        handles.push(tokio::spawn(async move {
            for round in 0..10 {
                storage
                    .set_item(&format!("writer-{writer}"), &round.to_string())
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.is_object());

    let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[tokio::test]
async fn file_is_a_json_object_of_strings() {
    let (storage, _tmp) = create_test_storage();

    storage.set_item("k", "[1,2]").await.unwrap();

    let raw = std::fs::read_to_string(storage.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({"k": "[1,2]"}));
}

#[tokio::test]
async fn corrupt_file_is_storage_error() {
    let (storage, _tmp) = create_test_storage();
    std::fs::write(storage.path(), "{not json").unwrap();

    let err = storage.get_item("k").await.unwrap_err();
    assert!(matches!(err, CoreError::StorageError(_)));

    let err = storage.set_item("k", "v").await.unwrap_err();
    assert!(matches!(err, CoreError::StorageError(_)));
    assert_eq!(std::fs::read_to_string(storage.path()).unwrap(), "{not json");
}

#[tokio::test]
async fn non_object_file_is_storage_error() {
    let (storage, _tmp) = create_test_storage();
    std::fs::write(storage.path(), "[]").unwrap();

    assert!(matches!(
        storage.get_item("k").await,
        Err(CoreError::StorageError(_))
    ));
}

#[tokio::test]
async fn empty_file_reads_as_empty() {
    let (storage, _tmp) = create_test_storage();
    std::fs::write(storage.path(), "").unwrap();

    assert_eq!(storage.get_item("k").await.unwrap(), None);
}

#[tokio::test]
async fn non_string_values_are_returned_as_json() {
    let (storage, _tmp) = create_test_storage();
    std::fs::write(
        storage.path(),
        r#"{"ssidList": [{"id": "1", "ssid": "Home", "password": "x"}]}"#,
    )
    .unwrap();

    let store = KeyValueCredentialStore::new(Arc::new(storage));
    assert_eq!(store.load().await.unwrap(), vec![network("1", "Home", "x")]);
}

// ===== CredentialStore over file Tests =====

#[tokio::test]
async fn credential_list_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let list = vec![network("1", "Home", "x"), network("2", "Cafe", "")];

    {
        let store = KeyValueCredentialStore::new(Arc::new(FileKeyValueStorage::new(tmp.path())));
        store.save(&list).await.unwrap();
    }

    let store = KeyValueCredentialStore::new(Arc::new(FileKeyValueStorage::new(tmp.path())));
    assert_eq!(store.load().await.unwrap(), list);
}

#[tokio::test]
async fn concurrent_saves_leave_one_complete_list() {
    let (storage, _tmp) = create_test_storage();
    let store = Arc::new(KeyValueCredentialStore::new(Arc::new(storage)));

    let first = vec![network("1", "A", "")];
    let second = vec![network("1", "A", ""), network("2", "B", "")];

    let (a, b) = tokio::join!(store.save(&first), store.save(&second));
    a.unwrap();
    b.unwrap();

    let loaded = store.load().await.unwrap();
    assert!(loaded == first || loaded == second);
}
