use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{apply_batch, replace_in, ApplyReport, BatchMode, PlayerStore};
use crate::engine::PlayerUpdate;
use crate::error::{DepthChartError, Result};
use crate::models::{Player, PlayerId};

/// Thread-safe in-memory roster.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: RwLock<Vec<Player>>,
}

impl MemoryStore {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players: RwLock::new(players) }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Player>>> {
        self.players.read().map_err(|_| DepthChartError::Store("player lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Player>>> {
        self.players.write().map_err(|_| DepthChartError::Store("player lock poisoned".into()))
    }
}

impl PlayerStore for MemoryStore {
    fn all(&self) -> Result<Vec<Player>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self.read()?.iter().find(|p| p.id == id).cloned())
    }

    fn replace(&self, player: Player) -> Result<Player> {
        replace_in(&mut self.write()?, player)
    }

    fn apply(&self, updates: &[PlayerUpdate], mode: BatchMode) -> Result<ApplyReport> {
        apply_batch(&mut self.write()?, updates, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, Status};

    #[test]
    fn test_memory_store_roundtrip() {
        let player = Player::new("Trevon", "Diggs", 7, Position::LCB, 1, Status::Active);
        let store = MemoryStore::new(vec![player.clone()]);

        assert_eq!(store.all().unwrap().len(), 1);
        assert_eq!(store.get(player.id).unwrap(), Some(player.clone()));
        assert_eq!(store.get(PlayerId::new()).unwrap(), None);

        let report = store
            .apply(&[PlayerUpdate::new(player.id, Position::RCB, 1)], BatchMode::Strict)
            .unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(store.all().unwrap()[0].position, Position::RCB);
    }
}
