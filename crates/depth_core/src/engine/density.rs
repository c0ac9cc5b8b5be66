use serde::Serialize;
use std::collections::HashMap;

use super::ordering::PlayerUpdate;
use crate::models::{Player, Position};

/// A position whose orders are not exactly `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DensityViolation {
    pub position: Position,
    /// Orders found at the position, ascending.
    pub orders: Vec<u32>,
}

fn orders_by_position(players: &[Player]) -> HashMap<Position, Vec<u32>> {
    let mut by_position: HashMap<Position, Vec<u32>> = HashMap::new();
    for player in players {
        by_position.entry(player.position).or_default().push(player.order);
    }
    by_position
}

/// Every position that breaks the dense-ordering invariant, in
/// [`Position::ALL`] order.
pub fn check_dense(players: &[Player]) -> Vec<DensityViolation> {
    let mut by_position = orders_by_position(players);

    Position::ALL
        .iter()
        .filter_map(|position| {
            let mut orders = by_position.remove(position)?;
            orders.sort_unstable();
            let dense = orders.iter().enumerate().all(|(i, &o)| o == i as u32 + 1);
            (!dense).then_some(DensityViolation { position: *position, orders })
        })
        .collect()
}

pub fn is_dense(players: &[Player]) -> bool {
    check_dense(players).is_empty()
}

/// Renumber every position to `1..=n`, keeping the relative order.
///
/// Ties on `order` fall back to last name, first name, then id. Returns
/// only the players whose order changes.
pub fn normalize_orders(players: &[Player]) -> Vec<PlayerUpdate> {
    let mut updates = Vec::new();

    for position in Position::ALL {
        let mut at: Vec<&Player> = players.iter().filter(|p| p.position == position).collect();
        at.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.last_name.cmp(&b.last_name))
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then_with(|| a.id.cmp(&b.id))
        });

        for (i, player) in at.into_iter().enumerate() {
            let order = i as u32 + 1;
            if player.order != order {
                updates.push(PlayerUpdate::new(player.id, position, order));
            }
        }
    }

    updates
}

/// Apply deltas in place. Returns how many deltas matched a player.
pub fn apply_updates(players: &mut [Player], updates: &[PlayerUpdate]) -> usize {
    let index: HashMap<_, _> = players.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
    let mut applied = 0;

    for update in updates {
        if let Some(&i) = index.get(&update.id) {
            players[i].position = update.position;
            players[i].order = update.order;
            applied += 1;
        }
    }

    applied
}
