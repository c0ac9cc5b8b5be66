//! Reorder / move / swap over a roster snapshot.
//!
//! Every operation is a pure function of the snapshot: it returns the deltas
//! to apply and never mutates its input. Given a snapshot where every
//! position is dense (`1..n`), applying the returned deltas yields a
//! snapshot where every position is still dense.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::{DepthChartError, Result};
use crate::models::{Player, PlayerId, Position};

/// New slot for one player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub id: PlayerId,
    pub position: Position,
    pub order: u32,
}

impl PlayerUpdate {
    pub fn new(id: PlayerId, position: Position, order: u32) -> Self {
        Self { id, position, order }
    }

    pub fn from_player(player: &Player) -> Self {
        Self::new(player.id, player.position, player.order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Up,
    Down,
}

pub(crate) fn find(snapshot: &[Player], id: PlayerId) -> Result<&Player> {
    snapshot.iter().find(|p| p.id == id).ok_or_else(|| DepthChartError::not_found(id))
}

pub fn count_at(snapshot: &[Player], position: Position) -> u32 {
    snapshot.iter().filter(|p| p.position == position).count() as u32
}

/// Order that appends to the bottom of `position`.
pub fn append_order(snapshot: &[Player], position: Position) -> u32 {
    count_at(snapshot, position) + 1
}

/// Shift every player at `position` (except `moving`) whose order falls in
/// `range` by one slot. Fails instead of wrapping past `0` or `u32::MAX`.
fn shift_range(
    snapshot: &[Player],
    position: Position,
    moving: PlayerId,
    range: RangeInclusive<u32>,
    shift: Shift,
) -> Result<Vec<PlayerUpdate>> {
    snapshot
        .iter()
        .filter(|p| p.id != moving && p.position == position && range.contains(&p.order))
        .map(|p| {
            let order = match shift {
                Shift::Up => p.order.checked_add(1),
                Shift::Down => p.order.checked_sub(1),
            };
            order.map(|order| PlayerUpdate::new(p.id, position, order)).ok_or_else(|| {
                DepthChartError::InvalidRequest(format!(
                    "order {} of player {} at {} cannot be shifted",
                    p.order, p.id, position
                ))
            })
        })
        .collect()
}

/// Move a player to `new_order` within its current position.
///
/// Players between the old and new slot close the gap (moving down the
/// list) or make room (moving up). `new_order` must be in `1..=count`.
pub fn reorder_within_position(
    snapshot: &[Player],
    player_id: PlayerId,
    new_order: u32,
) -> Result<Vec<PlayerUpdate>> {
    let target = find(snapshot, player_id)?;
    let position = target.position;
    let old_order = target.order;
    let max = count_at(snapshot, position);

    if new_order < 1 || new_order > max {
        return Err(DepthChartError::OrderOutOfRange { position, order: new_order, max });
    }
    if old_order == new_order {
        return Ok(Vec::new());
    }

    let mut updates = vec![PlayerUpdate::new(player_id, position, new_order)];
    if old_order < new_order {
        updates.extend(shift_range(
            snapshot,
            position,
            player_id,
            (old_order + 1)..=new_order,
            Shift::Down,
        )?);
    } else {
        updates.extend(shift_range(
            snapshot,
            position,
            player_id,
            new_order..=(old_order - 1),
            Shift::Up,
        )?);
    }
    Ok(updates)
}

/// Move a player to `new_order` at `new_position`.
///
/// Same-position moves go through [`reorder_within_position`]. Across
/// positions, `new_order` may be `count + 1` to append.
pub fn move_to_position(
    snapshot: &[Player],
    player_id: PlayerId,
    new_position: Position,
    new_order: u32,
) -> Result<Vec<PlayerUpdate>> {
    let target = find(snapshot, player_id)?;
    if target.position == new_position {
        return reorder_within_position(snapshot, player_id, new_order);
    }

    let old_position = target.position;
    let old_order = target.order;
    let max = append_order(snapshot, new_position);
    if new_order < 1 || new_order > max {
        return Err(DepthChartError::OrderOutOfRange {
            position: new_position,
            order: new_order,
            max,
        });
    }

    let mut updates = vec![PlayerUpdate::new(player_id, new_position, new_order)];
    updates.extend(shift_range(
        snapshot,
        new_position,
        player_id,
        new_order..=u32::MAX,
        Shift::Up,
    )?);
    updates.extend(shift_range(
        snapshot,
        old_position,
        player_id,
        (old_order + 1)..=u32::MAX,
        Shift::Down,
    )?);
    Ok(updates)
}

/// Exchange the full `(position, order)` slots of two players.
pub fn swap(
    snapshot: &[Player],
    player1_id: PlayerId,
    player2_id: PlayerId,
) -> Result<Vec<PlayerUpdate>> {
    if player1_id == player2_id {
        return Err(DepthChartError::SamePlayer { id: player1_id });
    }
    let first = find(snapshot, player1_id)?;
    let second = find(snapshot, player2_id)?;

    Ok(vec![
        PlayerUpdate::new(first.id, second.position, second.order),
        PlayerUpdate::new(second.id, first.position, first.order),
    ])
}
