use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::position::Position;
use super::status::Status;
use crate::error::DepthChartError;

/// Opaque player identity. Serialized as a hyphenated UUID string.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new() -> Self {
        PlayerId(Uuid::new_v4())
    }

}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PlayerId {
    fn from(uuid: Uuid) -> Self {
        PlayerId(uuid)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PlayerId {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(PlayerId)
            .map_err(|e| DepthChartError::InvalidRequest(format!("invalid player id {s:?}: {e}")))
    }
}

/// A rostered player and its slot on the depth chart.
///
/// `(position, order)` is the slot; order 1 is the starter. Every other field
/// is descriptive and never touched by the ordering engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    #[validate(range(max = 99))]
    pub jersey: u32,
    pub position: Position,
    #[validate(range(min = 1, max = 999))]
    pub order: u32,
    pub status: Status,
}

impl Player {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        jersey: u32,
        position: Position,
        order: u32,
        status: Status,
    ) -> Self {
        Self {
            id: PlayerId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            jersey,
            position,
            order,
            status,
        }
    }

    /// Display ordering: position code, then order, then id.
    pub fn display_cmp(&self, other: &Player) -> Ordering {
        self.position
            .code()
            .cmp(other.position.code())
            .then(self.order.cmp(&other.order))
            .then(self.id.cmp(&other.id))
    }
}

/// Sort a roster the way `GET /players` returns it.
pub fn sort_for_display(players: &mut [Player]) {
    players.sort_by(|a, b| a.display_cmp(b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_json_uses_camel_case() {
        let player = Player::new("Dak", "Prescott", 4, Position::QB, 1, Status::Active);
        let value = serde_json::to_value(&player).unwrap();

        assert_eq!(value["firstName"], "Dak");
        assert_eq!(value["lastName"], "Prescott");
        assert_eq!(value["position"], "QB");
        assert_eq!(value["status"], "A");
        assert_eq!(value["id"], player.id.to_string());
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        let mut player = Player::new("Dak", "Prescott", 4, Position::QB, 1, Status::Active);
        assert!(player.validate().is_ok());

        player.order = 0;
        assert!(player.validate().is_err());

        player.order = 1000;
        assert!(player.validate().is_err());

        player.order = 999;
        assert!(player.validate().is_ok());

        player.order = 1;
        player.jersey = 100;
        assert!(player.validate().is_err());

        player.jersey = 4;
        player.first_name.clear();
        assert!(player.validate().is_err());
    }

    #[test]
    fn test_display_sort() {
        let mut players = vec![
            Player::new("B", "Two", 2, Position::RB, 2, Status::Active),
            Player::new("Q", "One", 1, Position::QB, 1, Status::Active),
            Player::new("A", "One", 3, Position::RB, 1, Status::Active),
        ];
        sort_for_display(&mut players);

        let slots: Vec<(&str, u32)> = players.iter().map(|p| (p.position.code(), p.order)).collect();
        assert_eq!(slots, vec![("QB", 1), ("RB", 1), ("RB", 2)]);
    }

    #[test]
    fn test_player_id_parse() {
        let id = PlayerId::new();
        assert_eq!(id.to_string().parse::<PlayerId>().unwrap(), id);
        assert!("not-a-uuid".parse::<PlayerId>().is_err());
    }
}
