use crate::integration::support::{memory_store, seeded_store};
use serde_json::json;
use vinaedu_store::backend::KeyValueBackend;
use vinaedu_store::{Domain, StoreError};

fn store_with_admin() -> vinaedu_store::ResilientStore {
    let store = memory_store();
    store
        .write(
            Domain::Users,
            &json!([{
                "id": "1",
                "username": "admin",
                "password": "pw",
                "fullName": "Quản trị viên",
                "role": "ADMIN",
                "email": "admin@school.edu"
            }]),
        )
        .unwrap();
    store
}

#[test]
fn username_match_is_exact() {
    let store = store_with_admin();
    assert_eq!(store.login("admin", "pw").unwrap().username, "admin");
    assert!(matches!(
        store.login("ADMIN", "pw"),
        Err(StoreError::InvalidCredentials)
    ));
}

#[test]
fn email_match_ignores_case() {
    let store = store_with_admin();
    assert_eq!(store.login("Admin@School.Edu", "pw").unwrap().id, "1");
}

#[test]
fn wrong_secret_fails_and_leaves_no_session() {
    let store = store_with_admin();
    assert!(store.login("admin", "PW").is_err());
    assert!(store.current_user().is_none());
    assert!(store
        .backend()
        .get("vinaedu_session_user")
        .unwrap()
        .is_none());
}

#[test]
fn session_survives_and_is_cleared_by_logout() {
    let store = seeded_store();
    store.login("editor", "123").unwrap();
    let current = store.current_user().unwrap();
    assert_eq!(current.username, "editor");
    assert!(current.password.is_none());

    store.logout().unwrap();
    assert!(store.current_user().is_none());
}

#[test]
fn session_key_is_not_seeded_or_evicted() {
    let store = seeded_store();
    assert!(store
        .backend()
        .get("vinaedu_session_user")
        .unwrap()
        .is_none());

    store.login("admin", "admin123").unwrap();
    store.evict_orphans().unwrap();
    assert!(store.current_user().is_some());
}
