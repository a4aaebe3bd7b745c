use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use vinaedu_store::backend::{KeyValueBackend, SledBackend};
use vinaedu_store::{Domain, ResilientStore, SeedOutcome, StoreError};

fn open(dir: &TempDir, quota: Option<usize>) -> ResilientStore {
    let backend = SledBackend::open(&dir.path().join("store"), quota).unwrap();
    ResilientStore::new(Arc::new(backend))
}

#[test]
fn data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir, None);
        assert!(matches!(store.initialize(), SeedOutcome::Seeded { .. }));
        store
            .upsert_entity(Domain::Staff, json!({"id": "s3", "fullName": "Hà Thị D"}), "id")
            .unwrap();
        store.login("admin", "admin123").unwrap();
    }

    let store = open(&dir, None);
    assert_eq!(store.initialize(), SeedOutcome::AlreadySeeded);
    let staff = store.read(Domain::Staff);
    assert_eq!(staff.as_array().unwrap().last().unwrap()["id"], "s3");
    assert_eq!(store.current_user().unwrap().username, "admin");
}

#[test]
fn sled_quota_triggers_eviction_and_retry() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, Some(256));
    store
        .backend()
        .set("vinaedu_gallery_v1", &"x".repeat(200))
        .unwrap();

    let gallery = json!([{"id": "1", "url": "u", "caption": "c", "albumId": "a"}]);
    assert!(store.write(Domain::Gallery, &gallery).unwrap());
    assert!(store.backend().get("vinaedu_gallery_v1").unwrap().is_none());
    assert_eq!(store.read(Domain::Gallery), gallery);
}

#[test]
fn sled_genuine_exhaustion() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, Some(64));
    let err = store
        .write(Domain::Albums, &json!([{"id": "a", "title": "x".repeat(64)}]))
        .unwrap_err();
    assert!(matches!(err, StoreError::CapacityExceeded { .. }));
    assert_eq!(store.backend().usage().unwrap(), 0);
}
