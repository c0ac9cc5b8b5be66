use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::{apply_batch, replace_in, ApplyReport, BatchMode, PlayerStore};
use crate::engine::PlayerUpdate;
use crate::error::{DepthChartError, Result};
use crate::models::{Player, PlayerId};
use crate::seed;

/// In-memory roster that writes a JSON snapshot after every change.
///
/// A change is staged on a copy, written to disk, and only then made
/// visible, so a failed write leaves both memory and disk on the previous
/// roster.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    players: RwLock<Vec<Player>>,
}

impl FileStore {
    /// Open the snapshot at `path`, or create it from `initial` when it does
    /// not exist yet.
    pub fn open(path: impl Into<PathBuf>, initial: Vec<Player>) -> Result<Self> {
        let path = path.into();
        let players = if path.exists() {
            let players = seed::load_seed(&path)?;
            tracing::info!(path = %path.display(), players = players.len(), "snapshot loaded");
            players
        } else {
            write_snapshot(&path, &initial)?;
            tracing::info!(path = %path.display(), players = initial.len(), "snapshot created");
            initial
        };

        Ok(Self { path, players: RwLock::new(players) })
    }

    fn lock_err() -> DepthChartError {
        DepthChartError::Store("player lock poisoned".into())
    }

    /// Stage a change on a copy, persist it, then publish it.
    fn commit<T>(&self, change: impl FnOnce(&mut Vec<Player>) -> Result<T>) -> Result<T> {
        let mut guard = self.players.write().map_err(|_| Self::lock_err())?;
        let mut staged = guard.clone();
        let out = change(&mut staged)?;
        write_snapshot(&self.path, &staged)?;
        *guard = staged;
        Ok(out)
    }
}

impl PlayerStore for FileStore {
    fn all(&self) -> Result<Vec<Player>> {
        Ok(self.players.read().map_err(|_| Self::lock_err())?.clone())
    }

    fn get(&self, id: PlayerId) -> Result<Option<Player>> {
        let players = self.players.read().map_err(|_| Self::lock_err())?;
        Ok(players.iter().find(|p| p.id == id).cloned())
    }

    fn replace(&self, player: Player) -> Result<Player> {
        self.commit(|players| replace_in(players, player))
    }

    fn apply(&self, updates: &[PlayerUpdate], mode: BatchMode) -> Result<ApplyReport> {
        self.commit(|players| apply_batch(players, updates, mode))
    }
}

fn store_err(path: &Path, err: impl std::fmt::Display) -> DepthChartError {
    DepthChartError::Store(format!("{}: {}", path.display(), err))
}

/// Atomic write: temp file, fsync, rename.
fn write_snapshot(path: &Path, players: &[Player]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| store_err(parent, e))?;
    }

    let data = serde_json::to_vec_pretty(players).map_err(|e| store_err(path, e))?;
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path).map_err(|e| store_err(&temp_path, e))?;
        file.write_all(&data).map_err(|e| store_err(&temp_path, e))?;
        file.sync_all().map_err(|e| store_err(&temp_path, e))?;
    }
    rename(&temp_path, path).map_err(|e| store_err(path, e))?;

    tracing::debug!(bytes = data.len(), path = %path.display(), "snapshot written");
    Ok(())
}
