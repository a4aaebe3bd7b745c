use crate::integration::support::{
    memory_store, seeded_store, CountingBackend, UnreadableKeyBackend,
};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use vinaedu_store::backend::{KeyValueBackend, MemoryBackend};
use vinaedu_store::store::seed;
use vinaedu_store::{Domain, ResilientStore, SeedOutcome};

fn len(store: &ResilientStore, domain: Domain) -> usize {
    store.read(domain).as_array().map(Vec::len).unwrap_or(0)
}

#[test]
fn read_before_any_write_returns_defaults() {
    let store = memory_store();
    for domain in Domain::ALL {
        assert_eq!(store.read(domain), seed::default_value(domain), "{}", domain);
    }
}

#[test]
fn write_then_read_returns_the_same_value() {
    let store = memory_store();
    let staff = json!([{"id": "s1", "fullName": "Lò Văn C", "order": 1}]);
    assert!(store.write(Domain::Staff, &staff).unwrap());
    assert_eq!(store.read(Domain::Staff), staff);

    let settings = json!({"name": "THCS Demo", "homeNewsCount": 4});
    assert!(store.write(Domain::Settings, &settings).unwrap());
    assert_eq!(store.read(Domain::Settings), settings);
}

#[test]
fn writes_do_not_touch_other_buckets() {
    let store = seeded_store();
    let posts_before = store.read(Domain::Posts);
    store.write(Domain::Menu, &json!([])).unwrap();
    assert_eq!(store.read(Domain::Posts), posts_before);
}

#[test]
fn upsert_grows_by_one_only_for_new_ids() {
    let store = seeded_store();
    let before = len(&store, Domain::Documents);

    let doc = json!({"id": "d-new", "number": "01/TB", "title": "T", "date": "2024-01-01",
                     "categoryId": "cat_official", "downloadUrl": "#"});
    let first = store.upsert_entity(Domain::Documents, doc.clone(), "id").unwrap();
    assert!(first.inserted);
    assert_eq!(len(&store, Domain::Documents), before + 1);

    let second = store.upsert_entity(Domain::Documents, doc, "id").unwrap();
    assert!(!second.inserted);
    assert_eq!(len(&store, Domain::Documents), before + 1);
}

#[test]
fn remove_shrinks_by_one_on_match_and_is_noop_otherwise() {
    let store = seeded_store();
    let before = len(&store, Domain::Staff);

    let miss = store.remove_entity(Domain::Staff, "nobody", "id").unwrap();
    assert!(!miss.matched);
    assert_eq!(len(&store, Domain::Staff), before);

    let hit = store.remove_entity(Domain::Staff, "1", "id").unwrap();
    assert!(hit.matched);
    assert_eq!(len(&store, Domain::Staff), before - 1);
}

#[test]
fn posts_prepend_and_staff_append() {
    let store = memory_store();
    let (a, b, c) = (json!({"id": "A"}), json!({"id": "B"}), json!({"id": "C"}));

    store.write(Domain::Posts, &json!([a, b])).unwrap();
    store.upsert_entity(Domain::Posts, c.clone(), "id").unwrap();
    assert_eq!(store.read(Domain::Posts), json!([c, a, b]));

    store.write(Domain::Staff, &json!([a, b])).unwrap();
    store.upsert_entity(Domain::Staff, c.clone(), "id").unwrap();
    assert_eq!(store.read(Domain::Staff), json!([a, b, c]));
}

#[test]
fn updated_entity_keeps_its_position() {
    let store = memory_store();
    store
        .write(Domain::Posts, &json!([{"id": "A", "title": "a"}, {"id": "B", "title": "b"}]))
        .unwrap();
    store
        .upsert_entity(Domain::Posts, json!({"id": "B", "title": "b2"}), "id")
        .unwrap();
    assert_eq!(
        store.read(Domain::Posts),
        json!([{"id": "A", "title": "a"}, {"id": "B", "title": "b2"}])
    );
}

#[test]
fn custom_id_field_is_honoured() {
    let store = memory_store();
    store
        .write(Domain::Menu, &json!([{"slug": "home", "label": "Home"}]))
        .unwrap();
    let result = store
        .upsert_entity(Domain::Menu, json!({"slug": "home", "label": "Trang chủ"}), "slug")
        .unwrap();
    assert!(!result.inserted);
    assert_eq!(result.id, "home");
    assert!(store.remove_entity(Domain::Menu, "home", "slug").unwrap().matched);
    assert_eq!(store.read(Domain::Menu), json!([]));
}

#[test]
fn initialize_twice_seeds_once() {
    let backend = Arc::new(CountingBackend::new(MemoryBackend::new()));
    let store = ResilientStore::new(backend.clone());

    assert!(matches!(store.initialize(), SeedOutcome::Seeded { .. }));
    let after_first = backend.set_count();
    assert_eq!(after_first, Domain::ALL.len() + 1);
    assert_eq!(backend.written_keys()[0], "vinaedu_config_v4");
    assert_eq!(backend.written_keys().last().unwrap(), "vinaedu_initialized_v16");

    assert_eq!(store.initialize(), SeedOutcome::AlreadySeeded);
    assert_eq!(backend.set_count(), after_first);
}

#[test]
fn seeding_does_not_overwrite_after_flag_is_set() {
    let store = seeded_store();
    store.write(Domain::Staff, &json!([])).unwrap();
    store.initialize();
    assert_eq!(store.read(Domain::Staff), json!([]));
}

#[test]
fn unreadable_flag_leaves_user_data_alone() {
    let backend = Arc::new(UnreadableKeyBackend::new("vinaedu_initialized_v16"));
    let store = ResilientStore::new(backend.clone());
    store.initialize();
    let mine = json!([{"id": "mine", "fullName": "Z"}]);
    store.write(Domain::Staff, &mine).unwrap();

    backend.fail_reads.store(true, Ordering::SeqCst);
    assert_eq!(store.initialize(), SeedOutcome::FlagUnreadable);
    assert_eq!(store.read(Domain::Staff), mine);
}

#[test]
fn corrupt_bucket_falls_back_without_error() {
    let backend = Arc::new(MemoryBackend::new());
    backend.set("vinaedu_albums_v1", "\u{0}garbage").unwrap();
    let store = ResilientStore::new(backend);
    assert_eq!(store.read(Domain::Albums), seed::default_value(Domain::Albums));
}

#[test]
fn namespaces_are_isolated() {
    use vinaedu_store::store::schema::StorageSchema;

    let backend: Arc<MemoryBackend> = Arc::new(MemoryBackend::new());
    let school_a = ResilientStore::with_schema(backend.clone(), StorageSchema::new("school-a"));
    let school_b = ResilientStore::with_schema(backend.clone(), StorageSchema::new("school-b"));

    school_a.write(Domain::Menu, &json!([{"id": "a"}])).unwrap();
    assert_eq!(school_b.read(Domain::Menu), seed::default_value(Domain::Menu));
    assert!(backend.get("school-a_menu_v2").unwrap().is_some());
}
