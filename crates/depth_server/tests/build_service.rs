use clap::Parser;
use depth_core::{seed, BatchMode, Position};
use depth_server::{build_service, ServerConfig};
use std::fs;

const SEED: &str = r#"[
    {"FirstName": "Dak", "LastName": "Prescott", "Jersey": 4, "Position": "QB", "Order": 1, "Status": "A"},
    {"FirstName": "Cooper", "LastName": "Rush", "Jersey": 10, "Position": "QB", "Order": 5, "Status": "A"},
    {"FirstName": "Brandon", "LastName": "Aubrey", "Jersey": 17, "Position": "K", "Order": 1, "Status": "A"}
]"#;

fn config(args: &[&str]) -> ServerConfig {
    let mut argv = vec!["depth-server"];
    argv.extend_from_slice(args);
    ServerConfig::try_parse_from(argv).expect("valid flags")
}

#[test]
fn seed_is_loaded_and_normalized_into_memory() {
    let dir = tempfile::tempdir().unwrap();
    let seed_path = dir.path().join("seed.json");
    fs::write(&seed_path, SEED).unwrap();

    let service = build_service(&config(&["--seed", seed_path.to_str().unwrap()])).unwrap();
    let players = service.list_players().unwrap();

    assert_eq!(players.len(), 3);
    let qb_orders: Vec<u32> =
        players.iter().filter(|p| p.position == Position::QB).map(|p| p.order).collect();
    assert_eq!(qb_orders, vec![1, 2]);
}

#[test]
fn snapshot_receives_every_change() {
    let dir = tempfile::tempdir().unwrap();
    let seed_path = dir.path().join("seed.json");
    let snapshot_path = dir.path().join("roster.json");
    fs::write(&seed_path, SEED).unwrap();

    let service = build_service(&config(&[
        "--seed",
        seed_path.to_str().unwrap(),
        "--snapshot",
        snapshot_path.to_str().unwrap(),
        "--batch-mode",
        "strict",
    ]))
    .unwrap();
    assert_eq!(service.batch_mode(), BatchMode::Strict);

    let rush = service
        .list_players()
        .unwrap()
        .into_iter()
        .find(|p| p.last_name == "Rush")
        .unwrap();
    service.reorder_player(rush.id, 1).unwrap();

    let persisted = seed::load_seed(&snapshot_path).unwrap();
    let rush_on_disk = persisted.iter().find(|p| p.id == rush.id).unwrap();
    assert_eq!(rush_on_disk.order, 1);
}

#[test]
fn existing_snapshot_wins_over_seed() {
    let dir = tempfile::tempdir().unwrap();
    let seed_path = dir.path().join("seed.json");
    let snapshot_path = dir.path().join("roster.json");
    fs::write(&seed_path, SEED).unwrap();
    fs::write(&snapshot_path, "[]").unwrap();

    let service = build_service(&config(&[
        "--seed",
        seed_path.to_str().unwrap(),
        "--snapshot",
        snapshot_path.to_str().unwrap(),
    ]))
    .unwrap();
    assert!(service.list_players().unwrap().is_empty());
}

#[test]
fn missing_seed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(build_service(&config(&["--seed", missing.to_str().unwrap()])).is_err());
}
