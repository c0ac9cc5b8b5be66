use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DepthChartError;

/// Roster status code.
///
/// `I` and `R` are both injured reserve; `R` is the older code still
/// present in imported rosters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub enum Status {
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "P")]
    PracticeSquad,
    #[serde(rename = "I")]
    InjuredReserve,
    #[serde(rename = "R")]
    ReserveInjured,
}

/// One entry of the status key shown under the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusKeyEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub full_label: &'static str,
}

impl Status {
    pub const ALL: [Status; 4] =
        [Status::Active, Status::PracticeSquad, Status::InjuredReserve, Status::ReserveInjured];

    pub fn code(&self) -> &'static str {
        match self {
            Status::Active => "A",
            Status::PracticeSquad => "P",
            Status::InjuredReserve => "I",
            Status::ReserveInjured => "R",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "A",
            Status::PracticeSquad => "PS",
            Status::InjuredReserve | Status::ReserveInjured => "IR",
        }
    }

    pub fn full_label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::PracticeSquad => "Practice Squad",
            Status::InjuredReserve | Status::ReserveInjured => "Injured Reserve",
        }
    }
}

/// Status key with duplicate labels collapsed, first code wins.
pub fn status_key() -> Vec<StatusKeyEntry> {
    let mut entries: Vec<StatusKeyEntry> = Vec::new();
    for status in Status::ALL {
        if entries.iter().any(|e| e.label == status.label()) {
            continue;
        }
        entries.push(StatusKeyEntry {
            code: status.code(),
            label: status.label(),
            full_label: status.full_label(),
        });
    }
    entries
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Status {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .copied()
            .find(|st| st.code() == s)
            .ok_or_else(|| DepthChartError::InvalidRequest(format!("unknown status code: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_key_deduplicates_injured_reserve() {
        let key = status_key();
        let labels: Vec<&str> = key.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["A", "PS", "IR"]);
        assert_eq!(key[2].code, "I");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!("R".parse::<Status>().unwrap(), Status::ReserveInjured);
        assert_eq!(serde_json::to_string(&Status::PracticeSquad).unwrap(), "\"P\"");
        assert!("X".parse::<Status>().is_err());
    }
}
