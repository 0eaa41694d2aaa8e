use crate::{CanonicalRecord, Stat};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Marker serialized when neither record wins.
pub const TIE_MARKER: &str = "tie";

/// Winner of a single stat row or of the whole comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// Id of the record that came out strictly ahead.
    Record(i64),
    Tie,
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Winner::Record(id) => serializer.serialize_i64(*id),
            Winner::Tie => serializer.serialize_str(TIE_MARKER),
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Record(id) => write!(f, "#{}", id),
            Winner::Tie => write!(f, "{}", TIE_MARKER),
        }
    }
}

/// Both values of one stat row plus who holds the larger one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StatMatchup {
    pub pokemon1: u64,
    pub pokemon2: u64,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsComparison {
    pub hp: StatMatchup,
    pub attack: StatMatchup,
    pub defense: StatMatchup,
    pub special_attack: StatMatchup,
    pub special_defense: StatMatchup,
    pub speed: StatMatchup,
    pub total: StatMatchup,
}

impl StatsComparison {
    pub fn row(&self, stat: Stat) -> &StatMatchup {
        match stat {
            Stat::Hp => &self.hp,
            Stat::Attack => &self.attack,
            Stat::Defense => &self.defense,
            Stat::SpecialAttack => &self.special_attack,
            Stat::SpecialDefense => &self.special_defense,
            Stat::Speed => &self.speed,
        }
    }
}

/// Effectiveness findings credited to one side of the comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AdvantageList {
    /// This side's types that are super effective against the opponent.
    pub effective: Vec<String>,
    /// This side's types that the opponent resists.
    pub ineffective: Vec<String>,
    /// Opponent types immune to this side's types.
    pub immune: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TypeAdvantage {
    pub pokemon1: AdvantageList,
    pub pokemon2: AdvantageList,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Scores {
    pub pokemon1: i64,
    pub pokemon2: i64,
}

/// Full head-to-head analysis of two canonical records.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub pokemon1: CanonicalRecord,
    pub pokemon2: CanonicalRecord,
    pub stats_comparison: StatsComparison,
    pub type_advantage: TypeAdvantage,
    pub scores: Scores,
    pub overall_winner: Winner,
}
