//! Player storage.
//!
//! The service only needs "fetch all / fetch by id / replace one / apply a
//! batch of slot updates". [`MemoryStore`] keeps the roster in memory,
//! [`FileStore`] additionally writes a JSON snapshot after every change.

pub mod file;
pub mod memory;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::PlayerUpdate;
use crate::error::{DepthChartError, Result};
use crate::models::{Player, PlayerId};

pub use file::FileStore;
pub use memory::MemoryStore;

/// How a batch containing unknown ids is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    /// Apply the known ids, report the unknown ones as skipped.
    #[default]
    Lenient,
    /// Reject the whole batch if any id is unknown; nothing is applied.
    Strict,
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchMode::Lenient => f.write_str("lenient"),
            BatchMode::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for BatchMode {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(BatchMode::Lenient),
            "strict" => Ok(BatchMode::Strict),
            other => Err(DepthChartError::InvalidRequest(format!("unknown batch mode: {other}"))),
        }
    }
}

/// Outcome of applying a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub applied: usize,
    pub skipped: Vec<PlayerId>,
}

pub trait PlayerStore: Send + Sync {
    fn all(&self) -> Result<Vec<Player>>;

    fn get(&self, id: PlayerId) -> Result<Option<Player>>;

    /// Replace the stored record with the same id. Not-Found if absent.
    fn replace(&self, player: Player) -> Result<Player>;

    fn apply(&self, updates: &[PlayerUpdate], mode: BatchMode) -> Result<ApplyReport>;
}

/// Apply `updates` to `players` following `mode`. In strict mode the roster
/// is left untouched when an id is unknown.
pub(crate) fn apply_batch(
    players: &mut [Player],
    updates: &[PlayerUpdate],
    mode: BatchMode,
) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();

    let unknown: Vec<PlayerId> = updates
        .iter()
        .map(|u| u.id)
        .filter(|id| !players.iter().any(|p| p.id == *id))
        .collect();

    if mode == BatchMode::Strict {
        if let Some(id) = unknown.first() {
            return Err(DepthChartError::not_found(id));
        }
    }

    for update in updates {
        if let Some(player) = players.iter_mut().find(|p| p.id == update.id) {
            player.position = update.position;
            player.order = update.order;
            report.applied += 1;
        }
    }
    report.skipped = unknown;

    Ok(report)
}

pub(crate) fn replace_in(players: &mut [Player], player: Player) -> Result<Player> {
    let slot = players
        .iter_mut()
        .find(|p| p.id == player.id)
        .ok_or_else(|| DepthChartError::not_found(player.id))?;
    *slot = player.clone();
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, Status};

    fn roster() -> Vec<Player> {
        vec![
            Player::new("A", "One", 1, Position::QB, 1, Status::Active),
            Player::new("B", "Two", 2, Position::QB, 2, Status::Active),
        ]
    }

    #[test]
    fn test_lenient_batch_skips_unknown() {
        let mut players = roster();
        let ghost = PlayerId::new();
        let updates = vec![
            PlayerUpdate::new(players[0].id, Position::QB, 2),
            PlayerUpdate::new(ghost, Position::QB, 9),
            PlayerUpdate::new(players[1].id, Position::QB, 1),
        ];

        let report = apply_batch(&mut players, &updates, BatchMode::Lenient).unwrap();
        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped, vec![ghost]);
        assert_eq!(players[0].order, 2);
        assert_eq!(players[1].order, 1);
    }

    #[test]
    fn test_strict_batch_is_all_or_nothing() {
        let mut players = roster();
        let before = players.clone();
        let updates = vec![
            PlayerUpdate::new(players[0].id, Position::RB, 1),
            PlayerUpdate::new(PlayerId::new(), Position::QB, 1),
        ];

        let err = apply_batch(&mut players, &updates, BatchMode::Strict).unwrap_err();
        assert!(matches!(err, DepthChartError::NotFound { .. }));
        assert_eq!(players, before);
    }

    #[test]
    fn test_batch_mode_parse() {
        assert_eq!("STRICT".parse::<BatchMode>().unwrap(), BatchMode::Strict);
        assert_eq!("lenient".parse::<BatchMode>().unwrap(), BatchMode::Lenient);
        assert!("atomic".parse::<BatchMode>().is_err());
    }

    #[test]
    fn test_replace_requires_existing_id() {
        let mut players = roster();
        let stranger = Player::new("C", "Three", 3, Position::K, 1, Status::Active);
        assert!(replace_in(&mut players, stranger).is_err());

        let mut renamed = players[0].clone();
        renamed.jersey = 12;
        replace_in(&mut players, renamed).unwrap();
        assert_eq!(players[0].jersey, 12);
    }
}
