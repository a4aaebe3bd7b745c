use std::sync::Arc;
use std::time::Duration;
use vinaedu_store::backend::MemoryBackend;
use vinaedu_store::config::RemoteConfig;
use vinaedu_store::model::{GalleryAlbum, GalleryImage};
use vinaedu_store::remote::{
    CircuitBreaker, CircuitState, FailoverStore, MemoryTables, RemoteDomainStore,
};
use vinaedu_store::{DomainStore, ResilientStore, SchoolRepository};

fn remote_repo() -> (Arc<MemoryTables>, Arc<FailoverStore>, SchoolRepository) {
    let local = Arc::new(ResilientStore::new(Arc::new(MemoryBackend::new())));
    local.initialize();
    let tables = Arc::new(MemoryTables::new());
    let remote: Arc<dyn DomainStore> = Arc::new(RemoteDomainStore::new(tables.clone()));
    let failover = Arc::new(FailoverStore::new(
        local,
        Some(remote),
        CircuitBreaker::new(1, Duration::from_secs(3600)),
    ));
    let repo = SchoolRepository::new(failover.clone());
    (tables, failover, repo)
}

fn image(id: &str, album: &str) -> GalleryImage {
    GalleryImage {
        id: id.to_string(),
        url: format!("https://img.example/{}.jpg", id),
        caption: String::new(),
        album_id: album.to_string(),
    }
}

#[test]
fn album_cascade_runs_against_remote_tables() {
    let (tables, _, repo) = remote_repo();
    repo.save_album(&GalleryAlbum {
        id: "al1".to_string(),
        title: "Trại hè".to_string(),
        description: None,
        thumbnail: String::new(),
        created_date: "2024-06-01".to_string(),
    })
    .unwrap();
    repo.save_image(&image("i1", "al1")).unwrap();
    repo.save_image(&image("i2", "al1")).unwrap();
    repo.save_image(&image("i3", "other")).unwrap();

    assert_eq!(tables.rows("gallery_images").len(), 3);
    assert!(repo.delete_album("al1").unwrap().matched);

    let remaining = tables.rows("gallery_images");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["album_id"], "other");
    assert!(tables.rows("gallery_albums").is_empty());
}

#[test]
fn outage_falls_back_to_local_data() {
    let (tables, failover, repo) = remote_repo();
    tables.set_unavailable(true);

    let staff = repo.get_staff().unwrap();
    assert_eq!(staff.len(), 2);
    assert_eq!(failover.circuit_state(), CircuitState::Open);

    // Circuit open: writes go local without touching the remote.
    tables.set_unavailable(false);
    let mut member = staff[0].clone();
    member.id = String::new();
    repo.save_staff(&member).unwrap();
    assert!(tables.rows("staff").is_empty());
    assert_eq!(repo.get_staff().unwrap().len(), 3);
}

#[test]
fn from_config_ignores_placeholder_credentials() {
    let local = Arc::new(ResilientStore::new(Arc::new(MemoryBackend::new())));
    let config = RemoteConfig {
        url: "https://placeholder.supabase.co".to_string(),
        key: "placeholder".to_string(),
        ..RemoteConfig::default()
    };
    let store = FailoverStore::from_config(local, &config, Some(Arc::new(MemoryTables::new())));
    assert!(!store.has_remote());
}
