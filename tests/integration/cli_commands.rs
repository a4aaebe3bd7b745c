use serde_json::Value;
use std::io::Write;
use tempfile::TempDir;
use vinaedu_store::config::{BackendKind, ConfigLoader, StoreConfig};
use vinaedu_store::tooling::cli::{CliContext, Commands};
use vinaedu_store::ApiError;

fn sled_config(dir: &TempDir) -> StoreConfig {
    let mut config = StoreConfig::default();
    config.storage.backend = BackendKind::Sled;
    config.storage.path = Some(dir.path().join("store"));
    config
}

#[test]
fn init_upsert_get_across_contexts() {
    let dir = TempDir::new().unwrap();
    {
        let ctx = CliContext::from_config(sled_config(&dir)).unwrap();
        ctx.execute(&Commands::Init).unwrap();
        let out = ctx
            .execute(&Commands::Upsert {
                domain: "posts".to_string(),
                json: r#"{"title":"Thông báo","slug":"thong-bao","date":"2024-09-01","category":"news"}"#
                    .to_string(),
                id_field: "id".to_string(),
            })
            .unwrap();
        assert!(out.starts_with("Inserted posts post_"));
    }

    let ctx = CliContext::from_config(sled_config(&dir)).unwrap();
    let out = ctx
        .execute(&Commands::Get {
            domain: "posts".to_string(),
        })
        .unwrap();
    let posts: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(posts[0]["slug"], "thong-bao");
}

#[test]
fn set_with_wrong_shape_is_rejected() {
    let mut config = StoreConfig::default();
    config.storage.backend = BackendKind::Memory;
    let ctx = CliContext::from_config(config).unwrap();
    let err = ctx
        .execute(&Commands::Set {
            domain: "settings".to_string(),
            json: "[]".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::StorageError(_)));
}

#[test]
fn report_domain_write_that_does_not_fit_is_an_error_at_the_cli() {
    let mut config = StoreConfig::default();
    config.storage.backend = BackendKind::Memory;
    config.storage.quota_bytes = 32;
    let ctx = CliContext::from_config(config).unwrap();
    let err = ctx
        .execute(&Commands::Set {
            domain: "menu".to_string(),
            json: r#"[{"id":"1","label":"Giới thiệu","path":"/gioi-thieu","order":1}]"#.to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::NotPersisted(_)));
}

#[test]
fn config_file_drives_namespace() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vinaedu.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "namespace = \"truong-b\"\n[storage]\nbackend = \"memory\"\n"
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    let ctx = CliContext::from_config(config).unwrap();
    ctx.execute(&Commands::Init).unwrap();
    let keys = ctx.execute(&Commands::Keys).unwrap();
    assert!(keys.contains("truong-b_initialized_v16"));
    assert!(!keys.contains("vinaedu_"));
}
