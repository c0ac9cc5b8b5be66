//! # depth_core - Depth Chart Ordering Engine
//!
//! Keeps a team's depth chart consistent while players are reordered,
//! moved between positions and swapped.
//!
//! ## Features
//! - Dense per-position ordering (`1..n`, no gaps, no duplicates) under
//!   reorder, move and swap
//! - Pure engine functions returning the minimal set of slot updates
//! - Storage abstraction with in-memory and JSON snapshot stores
//! - Seed roster loading with case-insensitive field names

// Position codes mirror the roster vocabulary (QB, LDE, ...)
#![allow(clippy::upper_case_acronyms)]

pub mod engine;
pub mod error;
pub mod models;
pub mod seed;
pub mod service;
pub mod store;

pub use engine::{
    apply_updates, check_dense, is_dense, move_to_position, normalize_orders,
    reorder_within_position, swap, DensityViolation, PlayerUpdate,
};
pub use error::{DepthChartError, Result};
pub use models::{
    status_key, DepthChartView, FormationSlot, Phase, Player, PlayerId, Position, PositionGroup,
    Status, StatusKeyEntry, POSITION_GROUPS,
};
pub use service::DepthChartService;
pub use store::{ApplyReport, BatchMode, FileStore, MemoryStore, PlayerStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_seed_to_service_flow() {
        let json = r#"[
            {"firstName": "A", "lastName": "Starter", "jersey": 4, "position": "QB", "order": 1, "status": "A"},
            {"firstName": "B", "lastName": "Backup", "jersey": 10, "position": "QB", "order": 2, "status": "A"},
            {"firstName": "C", "lastName": "Third", "jersey": 15, "position": "QB", "order": 3, "status": "P"}
        ]"#;
        let players = seed::parse_seed(json).unwrap();
        let third = players[2].id;

        let service = DepthChartService::new(Arc::new(MemoryStore::new(players)));
        service.reorder_player(third, 1).unwrap();

        let listed = service.list_players().unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.last_name.as_str()).collect();
        assert_eq!(names, vec!["Third", "Starter", "Backup"]);
        assert!(is_dense(&listed));
    }
}
