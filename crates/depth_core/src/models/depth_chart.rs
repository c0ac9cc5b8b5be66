//! Read-only views of the roster: the phase/group chart and the formation.

use serde::Serialize;

use super::player::Player;
use super::position::{Phase, Position, PositionGroup};

#[derive(Debug, Clone, Serialize)]
pub struct DepthChartView {
    pub phases: Vec<PhaseView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseView {
    pub phase: Phase,
    pub groups: Vec<GroupView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupView {
    pub name: &'static str,
    pub positions: Vec<PositionView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    pub position: Position,
    pub display_name: &'static str,
    /// Players at this position before `depth` truncation.
    pub total: usize,
    pub players: Vec<Player>,
}

/// A slot on the formation diagram and who starts there.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationSlot {
    pub slot: &'static str,
    pub position: Position,
    pub starter: Option<Player>,
    pub depth: usize,
}

pub const FORMATION_SLOTS: [(&str, Position); 25] = [
    ("QB", Position::QB),
    ("RB", Position::RB),
    ("FB", Position::FB),
    ("LT", Position::LT),
    ("LG", Position::LG),
    ("C", Position::OC),
    ("RG", Position::RG),
    ("RT", Position::RT),
    ("WR-L", Position::X),
    ("WR-R", Position::Z),
    ("TE", Position::TE),
    ("LDE", Position::LDE),
    ("LDT", Position::OneTech),
    ("RDT", Position::ThreeTech),
    ("RDE", Position::RDE),
    ("WLB", Position::WLB),
    ("MLB", Position::MLB),
    ("SLB", Position::SLB),
    ("LCB", Position::LCB),
    ("RCB", Position::RCB),
    ("SS", Position::SS),
    ("FS", Position::FS),
    ("K", Position::K),
    ("P", Position::P),
    ("LS", Position::LS),
];

/// Players at `position`, starter first.
pub fn players_at(players: &[Player], position: Position) -> Vec<Player> {
    let mut at: Vec<Player> = players.iter().filter(|p| p.position == position).cloned().collect();
    at.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));
    at
}

/// Build the grouped chart. `phase` restricts to one phase, `depth` keeps
/// only the first N players of each position.
pub fn build_depth_chart(
    players: &[Player],
    phase: Option<Phase>,
    depth: Option<usize>,
) -> DepthChartView {
    let phases = Phase::ALL
        .iter()
        .copied()
        .filter(|p| phase.map_or(true, |wanted| wanted == *p))
        .map(|p| PhaseView {
            phase: p,
            groups: p.groups().map(|g| group_view(players, g, depth)).collect(),
        })
        .collect();

    DepthChartView { phases }
}

fn group_view(players: &[Player], group: &PositionGroup, depth: Option<usize>) -> GroupView {
    let positions = group
        .positions
        .iter()
        .map(|&position| {
            let mut at = players_at(players, position);
            let total = at.len();
            if let Some(limit) = depth {
                at.truncate(limit);
            }
            PositionView { position, display_name: position.display_name(), total, players: at }
        })
        .collect();

    GroupView { name: group.name, positions }
}

pub fn build_formation(players: &[Player]) -> Vec<FormationSlot> {
    FORMATION_SLOTS
        .iter()
        .map(|&(slot, position)| {
            let at = players_at(players, position);
            FormationSlot {
                slot,
                position,
                depth: at.len(),
                starter: at.into_iter().next(),
            }
        })
        .collect()
}
