use crate::integration::support::memory_store;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use vinaedu_store::Domain;

fn collection_domain() -> impl Strategy<Value = Domain> {
    prop::sample::select(
        Domain::ALL
            .iter()
            .copied()
            .filter(|d| *d != Domain::Settings)
            .collect::<Vec<_>>(),
    )
}

fn entities() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::btree_set("[a-z0-9]{1,8}", 0..8).prop_map(|ids: BTreeSet<String>| {
        ids.into_iter()
            .map(|id| json!({"id": id, "label": format!("entry {}", id)}))
            .collect()
    })
}

proptest! {
    #[test]
    fn write_read_round_trip(domain in collection_domain(), items in entities()) {
        let store = memory_store();
        let value = Value::Array(items);
        prop_assert!(store.write(domain, &value).unwrap());
        prop_assert_eq!(store.read(domain), value);
    }

    #[test]
    fn upsert_is_idempotent(
        domain in collection_domain(),
        items in entities(),
        id in "[a-z0-9]{1,8}",
    ) {
        let store = memory_store();
        store.write(domain, &Value::Array(items)).unwrap();
        let entity = json!({"id": id, "label": "upserted"});

        store.upsert_entity(domain, entity.clone(), "id").unwrap();
        let once = store.read(domain);
        store.upsert_entity(domain, entity, "id").unwrap();
        prop_assert_eq!(store.read(domain), once);
    }

    #[test]
    fn sizes_track_matches(
        domain in collection_domain(),
        items in entities(),
        id in "[a-z0-9]{1,8}",
    ) {
        let store = memory_store();
        let present = items.iter().any(|item| item["id"] == id.as_str());
        let before = items.len();
        store.write(domain, &Value::Array(items)).unwrap();

        let removal = store.remove_entity(domain, &id, "id").unwrap();
        prop_assert_eq!(removal.matched, present);
        let after = store.read(domain).as_array().unwrap().len();
        prop_assert_eq!(after, if present { before - 1 } else { before });

        store.upsert_entity(domain, json!({"id": id}), "id").unwrap();
        prop_assert_eq!(store.read(domain).as_array().unwrap().len(), after + 1);
    }
}
