use crate::integration::support::{BrokenBackend, OversizedKeyBackend};
use serde_json::json;
use std::sync::Arc;
use vinaedu_store::backend::{KeyValueBackend, MemoryBackend};
use vinaedu_store::{BackendError, Domain, ResilientStore, SeedOutcome, StoreError};

#[test]
fn write_succeeds_after_orphans_are_evicted() {
    let backend = Arc::new(MemoryBackend::with_quota(200));
    backend.set("vinaedu_posts_v4", &"x".repeat(150)).unwrap();
    backend.set("vinaedu_initialized_v15", "true").unwrap();
    let store = ResilientStore::new(backend.clone());

    let posts = json!([{"id": "p1", "title": "Khai giảng"}]);
    assert!(store.write(Domain::Posts, &posts).unwrap());

    assert_eq!(store.read(Domain::Posts), posts);
    assert!(backend.get("vinaedu_posts_v4").unwrap().is_none());
    assert!(backend.get("vinaedu_initialized_v15").unwrap().is_none());
}

#[test]
fn genuine_exhaustion_surfaces_for_surface_domains() {
    let backend = Arc::new(MemoryBackend::with_quota(100));
    backend.set("legacy_cache", &"x".repeat(80)).unwrap();
    let store = ResilientStore::new(backend.clone());

    let err = store
        .write(Domain::Gallery, &json!([{"id": "1", "url": "https://img.example/1.jpg"}]))
        .unwrap_err();
    assert!(matches!(err, StoreError::CapacityExceeded { ref key } if key == "vinaedu_gallery_v2"));
    assert_eq!(err.to_string(), "cannot save vinaedu_gallery_v2: storage full");
    // Keys outside the namespace are never evicted.
    assert!(backend.get("legacy_cache").unwrap().is_some());
}

#[test]
fn genuine_exhaustion_reports_false_for_report_domains() {
    let backend = Arc::new(MemoryBackend::with_quota(100));
    backend.set("legacy_cache", &"x".repeat(80)).unwrap();
    let store = ResilientStore::new(backend);

    let persisted = store
        .write(Domain::Staff, &json!([{"id": "1", "fullName": "Nguyễn Văn A"}]))
        .unwrap();
    assert!(!persisted);

    let result = store
        .upsert_entity(Domain::Staff, json!({"id": "2", "fullName": "B"}), "id")
        .unwrap();
    assert!(result.inserted);
    assert!(!result.persisted);
}

#[test]
fn non_quota_failures_skip_eviction() {
    let inner = MemoryBackend::new();
    inner.set("vinaedu_posts_v1", "[]").unwrap();
    let backend = Arc::new(BrokenBackend { inner });
    let store = ResilientStore::new(backend.clone());

    let err = store.write(Domain::Posts, &json!([])).unwrap_err();
    assert!(matches!(err, StoreError::Backend(BackendError::Io(_))));
    assert!(!store.write(Domain::Menu, &json!([])).unwrap());

    assert!(backend.get("vinaedu_posts_v1").unwrap().is_some());
}

#[test]
fn seeding_aborts_when_probe_cannot_be_written() {
    let backend = Arc::new(MemoryBackend::with_quota(64));
    let store = ResilientStore::new(backend.clone());

    assert_eq!(store.initialize(), SeedOutcome::ProbeFailed);
    assert!(backend.keys().unwrap().is_empty());

    // Reads still work from defaults.
    assert!(store.read(Domain::Posts).as_array().unwrap().len() > 1);
}

#[test]
fn seeding_continues_past_individual_failures() {
    let backend = Arc::new(OversizedKeyBackend {
        inner: MemoryBackend::new(),
        refused: "vinaedu_posts_v5".to_string(),
    });
    let store = ResilientStore::new(backend.clone());

    match store.initialize() {
        SeedOutcome::Seeded { skipped } => assert_eq!(skipped, vec![Domain::Posts]),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(store.is_seeded());
    assert!(backend.get("vinaedu_staff_v1").unwrap().is_some());
    assert!(backend.get("vinaedu_posts_v5").unwrap().is_none());
}
