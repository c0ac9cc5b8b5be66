use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DepthChartError;

/// Roster slot codes used by the depth chart.
///
/// Serialized as the raw code (`"QB"`, `"1-TECH"`, ...). The wire codes are
/// the database codes, not the display names: `OC` displays as `C`, `X` and
/// `Z` both display as `WR`.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub enum Position {
    // Offense
    QB,
    RB,
    FB,
    X,
    Z,
    TE,
    LT,
    LG,
    OC,
    RG,
    RT,
    // Defense
    LDE,
    #[serde(rename = "1-TECH")]
    OneTech,
    #[serde(rename = "3-TECH")]
    ThreeTech,
    RDE,
    WLB,
    MLB,
    SLB,
    LCB,
    SS,
    FS,
    RCB,
    // Special teams
    K,
    P,
    LS,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Offense,
    Defense,
    SpecialTeams,
}

/// A display grouping of positions ("Offensive Line" = LT, LG, OC, RG, RT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionGroup {
    pub name: &'static str,
    pub positions: &'static [Position],
    pub phase: Phase,
}

pub const POSITION_GROUPS: [PositionGroup; 10] = [
    PositionGroup { name: "Quarterbacks", positions: &[Position::QB], phase: Phase::Offense },
    PositionGroup { name: "Running Backs", positions: &[Position::RB], phase: Phase::Offense },
    PositionGroup {
        name: "Wide Receivers",
        positions: &[Position::Z, Position::X],
        phase: Phase::Offense,
    },
    PositionGroup { name: "Tight Ends", positions: &[Position::TE], phase: Phase::Offense },
    PositionGroup { name: "Fullbacks", positions: &[Position::FB], phase: Phase::Offense },
    PositionGroup {
        name: "Offensive Line",
        positions: &[Position::LT, Position::LG, Position::OC, Position::RG, Position::RT],
        phase: Phase::Offense,
    },
    PositionGroup {
        name: "Defensive Line",
        positions: &[Position::LDE, Position::OneTech, Position::ThreeTech, Position::RDE],
        phase: Phase::Defense,
    },
    PositionGroup {
        name: "Linebackers",
        positions: &[Position::WLB, Position::MLB, Position::SLB],
        phase: Phase::Defense,
    },
    PositionGroup {
        name: "Defensive Backs",
        positions: &[Position::LCB, Position::SS, Position::FS, Position::RCB],
        phase: Phase::Defense,
    },
    PositionGroup {
        name: "Special Teams",
        positions: &[Position::K, Position::P, Position::LS],
        phase: Phase::SpecialTeams,
    },
];

impl Position {
    pub const ALL: [Position; 25] = [
        Position::QB,
        Position::RB,
        Position::FB,
        Position::X,
        Position::Z,
        Position::TE,
        Position::LT,
        Position::LG,
        Position::OC,
        Position::RG,
        Position::RT,
        Position::LDE,
        Position::OneTech,
        Position::ThreeTech,
        Position::RDE,
        Position::WLB,
        Position::MLB,
        Position::SLB,
        Position::LCB,
        Position::SS,
        Position::FS,
        Position::RCB,
        Position::K,
        Position::P,
        Position::LS,
    ];

    /// Wire/database code.
    pub fn code(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::FB => "FB",
            Position::X => "X",
            Position::Z => "Z",
            Position::TE => "TE",
            Position::LT => "LT",
            Position::LG => "LG",
            Position::OC => "OC",
            Position::RG => "RG",
            Position::RT => "RT",
            Position::LDE => "LDE",
            Position::OneTech => "1-TECH",
            Position::ThreeTech => "3-TECH",
            Position::RDE => "RDE",
            Position::WLB => "WLB",
            Position::MLB => "MLB",
            Position::SLB => "SLB",
            Position::LCB => "LCB",
            Position::SS => "SS",
            Position::FS => "FS",
            Position::RCB => "RCB",
            Position::K => "K",
            Position::P => "P",
            Position::LS => "LS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Position::ALL.iter().copied().find(|p| p.code() == code)
    }

    /// Broadcast-style label shown on the chart.
    pub fn display_name(&self) -> &'static str {
        match self {
            Position::X | Position::Z => "WR",
            Position::OC => "C",
            Position::OneTech => "LDT",
            Position::ThreeTech => "RDT",
            Position::K => "PK",
            other => other.code(),
        }
    }

    pub fn group(&self) -> &'static PositionGroup {
        let index = match self {
            Position::QB => 0,
            Position::RB => 1,
            Position::X | Position::Z => 2,
            Position::TE => 3,
            Position::FB => 4,
            Position::LT | Position::LG | Position::OC | Position::RG | Position::RT => 5,
            Position::LDE | Position::OneTech | Position::ThreeTech | Position::RDE => 6,
            Position::WLB | Position::MLB | Position::SLB => 7,
            Position::LCB | Position::SS | Position::FS | Position::RCB => 8,
            Position::K | Position::P | Position::LS => 9,
        };
        &POSITION_GROUPS[index]
    }

    pub fn phase(&self) -> Phase {
        self.group().phase
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_code(s)
            .ok_or_else(|| DepthChartError::InvalidRequest(format!("unknown position code: {s}")))
    }
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Offense, Phase::Defense, Phase::SpecialTeams];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Offense => "offense",
            Phase::Defense => "defense",
            Phase::SpecialTeams => "special-teams",
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = &'static PositionGroup> + '_ {
        POSITION_GROUPS.iter().filter(move |g| g.phase == *self)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = DepthChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DepthChartError::InvalidRequest(format!("unknown phase: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_position_belongs_to_exactly_one_group() {
        for position in Position::ALL {
            let count = POSITION_GROUPS.iter().filter(|g| g.positions.contains(&position)).count();
            assert_eq!(count, 1, "{position} should be in exactly one group");
        }
    }

    #[test]
    fn test_group_lists_its_position() {
        for position in Position::ALL {
            assert!(position.group().positions.contains(&position), "{position}");
        }
        assert_eq!(Position::OC.group().name, "Offensive Line");
        assert_eq!(Position::LS.phase(), Phase::SpecialTeams);
    }

    #[test]
    fn test_code_roundtrip_through_serde() {
        for position in Position::ALL {
            let json = serde_json::to_string(&position).unwrap();
            assert_eq!(json, format!("\"{}\"", position.code()));
            assert_eq!(Position::from_code(position.code()), Some(position));
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Position::OC.display_name(), "C");
        assert_eq!(Position::X.display_name(), "WR");
        assert_eq!(Position::OneTech.display_name(), "LDT");
        assert_eq!(Position::K.display_name(), "PK");
        assert_eq!(Position::QB.display_name(), "QB");
    }

    #[test]
    fn test_phases() {
        assert_eq!(Position::QB.phase(), Phase::Offense);
        assert_eq!(Position::ThreeTech.phase(), Phase::Defense);
        assert_eq!(Position::LS.phase(), Phase::SpecialTeams);
        assert_eq!("special-teams".parse::<Phase>().unwrap(), Phase::SpecialTeams);
        assert!("kickoff".parse::<Phase>().is_err());
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!("WR".parse::<Position>().is_err());
        assert!(serde_json::from_str::<Position>("\"qb\"").is_err());
    }
}
