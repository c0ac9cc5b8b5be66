//! Request-level operations over a [`PlayerStore`].
//!
//! Each mutating call holds the write gate across read snapshot, compute,
//! apply, so requests are processed one at a time against a consistent
//! snapshot. Engine-computed deltas are always applied in strict mode.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::engine::{self, PlayerUpdate};
use crate::error::{DepthChartError, Result};
use crate::models::{
    build_depth_chart, build_formation, sort_for_display, DepthChartView, FormationSlot, Phase,
    Player, PlayerId, Position,
};
use crate::store::{ApplyReport, BatchMode, PlayerStore};

pub struct DepthChartService {
    store: Arc<dyn PlayerStore>,
    batch_mode: BatchMode,
    write_gate: Mutex<()>,
}

impl DepthChartService {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self { store, batch_mode: BatchMode::default(), write_gate: Mutex::new(()) }
    }

    /// Batch semantics for [`DepthChartService::reorder_batch`].
    pub fn with_batch_mode(mut self, mode: BatchMode) -> Self {
        self.batch_mode = mode;
        self
    }

    pub fn batch_mode(&self) -> BatchMode {
        self.batch_mode
    }

    /// The gate guards no data, so a panic while it was held leaves nothing
    /// to repair.
    fn gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list_players(&self) -> Result<Vec<Player>> {
        let mut players = self.store.all()?;
        sort_for_display(&mut players);
        Ok(players)
    }

    pub fn get_player(&self, id: PlayerId) -> Result<Player> {
        self.store.get(id)?.ok_or_else(|| DepthChartError::not_found(id))
    }

    /// Replace one full record. The body id must match the path id.
    pub fn update_player(&self, id: PlayerId, player: Player) -> Result<Player> {
        if player.id != id {
            return Err(DepthChartError::InvalidRequest(format!(
                "path id {id} does not match body id {}",
                player.id
            )));
        }
        player.validate()?;

        let _gate = self.gate();
        let stored = self.store.replace(player)?;
        info!(player = %stored.id, position = %stored.position, order = stored.order, "player updated");
        self.warn_if_not_dense()?;
        Ok(stored)
    }

    /// Apply client-computed slots (`position`/`order` of each record).
    ///
    /// Unknown ids are skipped in lenient mode and reject the whole batch in
    /// strict mode. Density is not enforced here.
    pub fn reorder_batch(&self, players: Vec<Player>) -> Result<ApplyReport> {
        for player in &players {
            player.validate()?;
        }
        let updates: Vec<PlayerUpdate> = players.iter().map(PlayerUpdate::from_player).collect();

        let _gate = self.gate();
        let report = self.store.apply(&updates, self.batch_mode)?;
        info!(
            applied = report.applied,
            skipped = report.skipped.len(),
            mode = %self.batch_mode,
            "reorder batch applied"
        );
        for id in &report.skipped {
            debug!(player = %id, "reorder skipped unknown player");
        }
        self.warn_if_not_dense()?;
        Ok(report)
    }

    /// Exchange the full slots of two players. Returns both updated records.
    pub fn swap_players(&self, player1_id: PlayerId, player2_id: PlayerId) -> Result<(Player, Player)> {
        let changed = self.run(|snapshot| engine::swap(snapshot, player1_id, player2_id))?;

        let pick = |id: PlayerId| {
            changed
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| DepthChartError::not_found(id))
        };
        let (first, second) = (pick(player1_id)?, pick(player2_id)?);
        info!(player1 = %player1_id, player2 = %player2_id, "players swapped");
        Ok((first, second))
    }

    /// Move a player to `position`; `order` defaults to the bottom of the list.
    pub fn move_player(
        &self,
        id: PlayerId,
        position: Position,
        order: Option<u32>,
    ) -> Result<Vec<Player>> {
        let changed = self.run(|snapshot| {
            let order = match order {
                Some(order) => order,
                None => {
                    let current = engine::ordering::find(snapshot, id)?;
                    if current.position == position {
                        engine::count_at(snapshot, position)
                    } else {
                        engine::append_order(snapshot, position)
                    }
                }
            };
            engine::move_to_position(snapshot, id, position, order)
        })?;
        info!(player = %id, position = %position, changed = changed.len(), "player moved");
        Ok(changed)
    }

    pub fn reorder_player(&self, id: PlayerId, order: u32) -> Result<Vec<Player>> {
        let changed = self.run(|snapshot| engine::reorder_within_position(snapshot, id, order))?;
        info!(player = %id, order, changed = changed.len(), "player reordered");
        Ok(changed)
    }

    pub fn depth_chart(&self, phase: Option<Phase>, depth: Option<usize>) -> Result<DepthChartView> {
        Ok(build_depth_chart(&self.store.all()?, phase, depth))
    }

    pub fn formation(&self) -> Result<Vec<FormationSlot>> {
        Ok(build_formation(&self.store.all()?))
    }

    /// Snapshot, compute deltas, apply them all-or-nothing. Returns the
    /// changed players in display order.
    fn run(
        &self,
        compute: impl FnOnce(&[Player]) -> Result<Vec<PlayerUpdate>>,
    ) -> Result<Vec<Player>> {
        let _gate = self.gate();
        let mut snapshot = self.store.all()?;
        let updates = compute(&snapshot)?;
        if updates.is_empty() {
            return Ok(Vec::new());
        }

        self.store.apply(&updates, BatchMode::Strict)?;

        engine::apply_updates(&mut snapshot, &updates);
        let mut changed: Vec<Player> =
            snapshot.into_iter().filter(|p| updates.iter().any(|u| u.id == p.id)).collect();
        sort_for_display(&mut changed);
        Ok(changed)
    }

    fn warn_if_not_dense(&self) -> Result<()> {
        let players = self.store.all()?;
        for violation in engine::check_dense(&players) {
            warn!(
                position = %violation.position,
                orders = ?violation.orders,
                "position is no longer densely ordered"
            );
        }
        Ok(())
    }
}
