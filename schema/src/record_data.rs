use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;
use strum::{Display, EnumIter, IntoEnumIterator};

/// One of the six base stats every record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    /// All six stats in display order.
    pub fn all() -> impl Iterator<Item = Stat> {
        Stat::iter()
    }

    /// Key under the compact camel-case convention (`stats` block).
    pub fn compact_key(self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::SpecialAttack => "specialAttack",
            Stat::SpecialDefense => "specialDefense",
            Stat::Speed => "speed",
        }
    }

    /// Key under the verbose display convention (`base` block).
    pub fn display_key(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpecialAttack => "Sp. Attack",
            Stat::SpecialDefense => "Sp. Defense",
            Stat::Speed => "Speed",
        }
    }
}

/// Names in the four supported languages. Absent names are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedName {
    pub french: String,
    pub english: String,
    pub japanese: String,
    pub chinese: String,
}

impl LocalizedName {
    pub const LANGUAGES: [&'static str; 4] = ["french", "english", "japanese", "chinese"];

    pub fn slot_mut(&mut self, language: &str) -> Option<&mut String> {
        match language {
            "french" => Some(&mut self.french),
            "english" => Some(&mut self.english),
            "japanese" => Some(&mut self.japanese),
            "chinese" => Some(&mut self.chinese),
            _ => None,
        }
    }
}

/// The six reconciled stats, serialized under the compact convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u32) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::SpecialAttack => self.special_attack = value,
            Stat::SpecialDefense => self.special_defense = value,
            Stat::Speed => self.speed = value,
        }
    }

    /// Sum of all six stats.
    pub fn total(&self) -> u64 {
        Stat::all().map(|stat| u64::from(self.get(stat))).sum()
    }

    /// The same six values under the verbose display convention.
    pub fn legacy_view(&self) -> LegacyStatsView {
        LegacyStatsView {
            hp: self.hp,
            attack: self.attack,
            defense: self.defense,
            special_attack: self.special_attack,
            special_defense: self.special_defense,
            speed: self.speed,
        }
    }
}

/// Display-keyed rendition of [`BaseStats`], emitted as the `base` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LegacyStatsView {
    #[serde(rename = "HP")]
    pub hp: u32,
    #[serde(rename = "Attack")]
    pub attack: u32,
    #[serde(rename = "Defense")]
    pub defense: u32,
    #[serde(rename = "Sp. Attack")]
    pub special_attack: u32,
    #[serde(rename = "Sp. Defense")]
    pub special_defense: u32,
    #[serde(rename = "Speed")]
    pub speed: u32,
}

/// The single stable record shape handed to consumers.
///
/// Types and stats are held once. Serialization writes `types` and `type`
/// from the same list and `stats` and `base` from the same [`BaseStats`],
/// so the duplicated fields can never diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub id: i64,
    pub name: LocalizedName,
    pub types: Vec<String>,
    pub stats: BaseStats,
    pub image: String,
    pub evolutions: Vec<i64>,
}

impl CanonicalRecord {
    /// The legacy `type` field. Always identical to `types`.
    pub fn type_field(&self) -> &[String] {
        &self.types
    }

    pub fn stats_legacy_view(&self) -> LegacyStatsView {
        self.stats.legacy_view()
    }
}

impl Serialize for CanonicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CanonicalRecord", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("types", &self.types)?;
        state.serialize_field("type", &self.types)?;
        state.serialize_field("stats", &self.stats)?;
        state.serialize_field("base", &self.stats.legacy_view())?;
        state.serialize_field("image", &self.image)?;
        state.serialize_field("evolutions", &self.evolutions)?;
        state.end()
    }
}
