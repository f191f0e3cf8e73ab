//! End-to-end loader and canonical-write tests over a real temp directory.

use std::fs;

use assert_json_diff::assert_json_eq;
use serde_json::json;
use tempfile::tempdir;

use tb_io::canonical_json::write_canonical_file;
use tb_io::registry::load_registry;
use tb_io::setup::load_setup;
use tb_io::try_sha256_canonical;

const REGISTRY: &str = r#"{
    "categories": [
        {"id": "full-house", "name": "Full House", "priority": "ultimate",
         "weight_pct": 70, "display_order": 2},
        {"id": "early-seven", "name": "Early Seven", "priority": "low",
         "weight_pct": 30, "display_order": 1}
    ]
}"#;

#[test]
fn setup_resolves_registry_next_to_it() {
    let dir = tempdir().unwrap();
    let setup_path = dir.path().join("game.json");
    let registry_path = dir.path().join("prizes.json");
    fs::write(
        &setup_path,
        r#"{"players": 6, "stake_per_player": 25, "registry_path": "prizes.json"}"#,
    )
    .unwrap();
    fs::write(&registry_path, REGISTRY).unwrap();

    let loaded = load_setup(&setup_path).unwrap();
    assert_eq!(loaded.setup.players, 6);
    assert_eq!(loaded.setup.prize_pool(), 150);
    let resolved = loaded.registry_path.expect("registry path present");
    assert_eq!(resolved, registry_path);

    let registry = load_registry(&resolved).unwrap();
    assert_eq!(registry.len(), 2);
}

#[test]
fn missing_setup_file_is_a_path_error() {
    let dir = tempdir().unwrap();
    let err = load_setup(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, tb_io::IoError::Path(_)), "{err}");
}

#[test]
fn canonical_write_is_sorted_and_reparseable() {
    #[derive(serde::Serialize)]
    struct Doc {
        zulu: u32,
        alpha: &'static str,
    }

    let dir = tempdir().unwrap();
    let path = dir.path().join("artifacts").join("doc.json");
    write_canonical_file(&path, &Doc { zulu: 9, alpha: "a" }).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw, r#"{"alpha":"a","zulu":9}"#);

    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_json_eq!(parsed, json!({"alpha": "a", "zulu": 9}));
}

#[test]
fn canonical_write_replaces_existing_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.json");
    write_canonical_file(&path, &json!({"v": 1, "padding": "xxxxxxxxxxxxxxxx"})).unwrap();
    write_canonical_file(&path, &json!({"v": 2})).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"v":2}"#);
}

#[test]
fn registry_digest_is_stable_across_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prizes.json");
    fs::write(&path, REGISTRY).unwrap();

    let a = try_sha256_canonical(&load_registry(&path).unwrap()).unwrap();
    let b = try_sha256_canonical(&load_registry(&path).unwrap()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f')));
}
