//! Seed roster loading.
//!
//! A seed is a JSON array of player records. Field names match ignoring
//! ASCII case (`FirstName`, `firstname` and `firstName` are the same field),
//! a missing `id` gets a fresh one, and positions that are not densely
//! ordered are renumbered.

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use validator::Validate;

use crate::engine::{apply_updates, check_dense, normalize_orders};
use crate::error::{DepthChartError, Result};
use crate::models::{Player, PlayerId};

/// Canonical field names of a seed record.
pub const SEED_FIELDS: [&str; 7] =
    ["id", "firstName", "lastName", "jersey", "position", "order", "status"];

fn seed_err(index: usize, message: impl std::fmt::Display) -> DepthChartError {
    DepthChartError::Seed(format!("record {index}: {message}"))
}

/// Rewrite the keys of one record to their canonical spelling.
fn canonicalize(index: usize, record: Map<String, Value>) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    for (key, value) in record {
        let Some(field) = SEED_FIELDS.iter().find(|f| f.eq_ignore_ascii_case(&key)) else {
            tracing::debug!(record = index, field = %key, "ignoring unknown seed field");
            continue;
        };
        if out.insert(field.to_string(), value).is_some() {
            return Err(seed_err(index, format!("field {field} given more than once")));
        }
    }
    if !out.contains_key("id") {
        out.insert("id".into(), Value::String(PlayerId::new().to_string()));
    }
    Ok(out)
}

/// Parse and validate seed records without renumbering.
pub fn parse_records(json: &str) -> Result<Vec<Player>> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| DepthChartError::Seed(format!("invalid JSON: {e}")))?;
    let Value::Array(records) = value else {
        return Err(DepthChartError::Seed("seed must be a JSON array of players".into()));
    };

    let mut seen = HashSet::new();
    let mut players = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let Value::Object(record) = record else {
            return Err(seed_err(index, "not an object"));
        };
        let record = canonicalize(index, record)?;
        let player: Player =
            serde_json::from_value(Value::Object(record)).map_err(|e| seed_err(index, e))?;
        player.validate().map_err(|e| seed_err(index, e))?;
        if !seen.insert(player.id) {
            return Err(seed_err(index, format!("duplicate id {}", player.id)));
        }
        players.push(player);
    }

    Ok(players)
}

/// Renumber any position that is not dense. Returns how many players moved.
pub fn normalize_seed(players: &mut [Player]) -> usize {
    for violation in check_dense(players) {
        tracing::warn!(
            position = %violation.position,
            orders = ?violation.orders,
            "seed position is not densely ordered, renumbering"
        );
    }
    let updates = normalize_orders(players);
    apply_updates(players, &updates)
}

pub fn parse_seed(json: &str) -> Result<Vec<Player>> {
    let mut players = parse_records(json)?;
    normalize_seed(&mut players);
    Ok(players)
}

pub fn load_seed(path: &Path) -> Result<Vec<Player>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| DepthChartError::Seed(format!("{}: {}", path.display(), e)))?;
    let players = parse_seed(&json)?;
    tracing::info!(path = %path.display(), players = players.len(), "seed loaded");
    Ok(players)
}
