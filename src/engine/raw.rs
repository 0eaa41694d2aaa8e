//! Decoding of stored records into the known legacy shapes.
//!
//! A stored document has drifted over time: ids written as numbers or
//! strings, names as a plain string or a per-language object, types under
//! `type` or `types` (as a list or a bare string), and stats under a
//! display-keyed `base` block, a camel-case `stats` block, or both.
//! [`RawRecord`] captures each of those variations as an explicit enum so
//! the normalizer can match on them exhaustively.

use schema::Stat;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A stored record decoded into its legacy shape. Decoding never fails;
/// anything unrecognized is treated as absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawRecord {
    pub id: IdField,
    pub name: NameField,
    pub types: TypeField,
    pub stats: StatBlocks,
    pub image: Option<String>,
    pub evolutions: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdField {
    Missing,
    Integer(i64),
    /// Present but not interpretable as an integer id.
    Unusable(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NameField {
    Missing,
    /// A single untranslated name.
    Plain(String),
    /// Per-language names; only string-valued entries are kept.
    Localized(BTreeMap<String, String>),
}

/// Which of the two type-list fields a record carries.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeField {
    Neither,
    TypesOnly(Vec<String>),
    TypeOnly(Vec<String>),
    Both {
        types: Vec<String>,
        legacy: Vec<String>,
    },
}

/// Which stat blocks a record carries.
#[derive(Debug, Clone, PartialEq)]
pub enum StatBlocks {
    Bare,
    /// Only the display-keyed `base` block.
    LegacyOnly(StatBlock),
    /// Only the camel-case `stats` block.
    CanonicalOnly(StatBlock),
    Both {
        legacy: StatBlock,
        canonical: StatBlock,
    },
}

/// Key naming convention of a single stat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// `HP`, `Attack`, `Sp_Attack`, ...
    Abbreviated,
    /// `Sp. Attack`, `Sp. Defense`.
    Display,
    /// `hp`, `specialAttack`, ...
    Compact,
}

/// Where a candidate stat value came from, in reconciliation priority
/// order (earliest wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatSource {
    LegacyAbbreviated,
    LegacyDisplay,
    CanonicalCompact,
    CanonicalDisplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Legacy,
    Canonical,
}

impl StatSource {
    fn of(block: BlockKind, convention: Convention) -> StatSource {
        match (block, convention) {
            (BlockKind::Legacy, Convention::Abbreviated) => StatSource::LegacyAbbreviated,
            (BlockKind::Legacy, Convention::Display) => StatSource::LegacyDisplay,
            (BlockKind::Legacy, Convention::Compact) => StatSource::CanonicalCompact,
            (BlockKind::Canonical, Convention::Compact) => StatSource::CanonicalCompact,
            (BlockKind::Canonical, Convention::Abbreviated | Convention::Display) => {
                StatSource::CanonicalDisplay
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatEntry {
    pub stat: Stat,
    pub convention: Convention,
    pub value: u32,
}

/// The recognized entries of one stat block, in document key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatBlock {
    pub entries: Vec<StatEntry>,
}

impl StatBlock {
    fn decode(map: &Map<String, Value>) -> StatBlock {
        let entries = map
            .iter()
            .filter_map(|(key, raw)| {
                let (stat, convention) = classify_stat_key(key)?;
                let Some(value) = decode_stat_value(raw) else {
                    log::debug!("Ignoring stat {:?}: {} is not a whole number", key, raw);
                    return None;
                };
                Some(StatEntry {
                    stat,
                    convention,
                    value,
                })
            })
            .collect();
        StatBlock { entries }
    }

    fn values_for(&self, stat: Stat) -> impl Iterator<Item = &StatEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.stat == stat)
    }
}

impl StatBlocks {
    /// Every value recorded for `stat`, tagged with its source.
    pub fn candidates(&self, stat: Stat) -> Vec<(StatSource, u32)> {
        let tagged = |block: &StatBlock, kind: BlockKind| -> Vec<(StatSource, u32)> {
            block
                .values_for(stat)
                .map(|entry| (StatSource::of(kind, entry.convention), entry.value))
                .collect()
        };

        let mut candidates = match self {
            StatBlocks::Bare => Vec::new(),
            StatBlocks::LegacyOnly(legacy) => tagged(legacy, BlockKind::Legacy),
            StatBlocks::CanonicalOnly(canonical) => tagged(canonical, BlockKind::Canonical),
            StatBlocks::Both { legacy, canonical } => {
                let mut all = tagged(legacy, BlockKind::Legacy);
                all.extend(tagged(canonical, BlockKind::Canonical));
                all
            }
        };
        candidates.sort_by_key(|(source, _)| *source);
        candidates
    }
}

/// Map a stat key under any known naming convention to its stat.
pub fn classify_stat_key(key: &str) -> Option<(Stat, Convention)> {
    let classified = match key {
        "HP" => (Stat::Hp, Convention::Abbreviated),
        "Attack" => (Stat::Attack, Convention::Abbreviated),
        "Defense" => (Stat::Defense, Convention::Abbreviated),
        "Sp_Attack" => (Stat::SpecialAttack, Convention::Abbreviated),
        "Sp_Defense" => (Stat::SpecialDefense, Convention::Abbreviated),
        "Speed" => (Stat::Speed, Convention::Abbreviated),
        "Sp. Attack" => (Stat::SpecialAttack, Convention::Display),
        "Sp. Defense" => (Stat::SpecialDefense, Convention::Display),
        "hp" => (Stat::Hp, Convention::Compact),
        "attack" => (Stat::Attack, Convention::Compact),
        "defense" => (Stat::Defense, Convention::Compact),
        "specialAttack" => (Stat::SpecialAttack, Convention::Compact),
        "specialDefense" => (Stat::SpecialDefense, Convention::Compact),
        "speed" => (Stat::Speed, Convention::Compact),
        _ => return None,
    };
    Some(classified)
}

fn decode_stat_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                u32::try_from(n).ok()
            } else {
                number
                    .as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                    .filter(|f| *f <= f64::from(u32::MAX))
                    .map(|f| f as u32)
            }
        }
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn decode_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn decode_id(value: Option<&Value>) -> IdField {
    match value {
        None | Some(Value::Null) => IdField::Missing,
        Some(value) => match decode_integer(value) {
            Some(id) => IdField::Integer(id),
            None => IdField::Unusable(value.clone()),
        },
    }
}

fn decode_name(value: Option<&Value>) -> NameField {
    match value {
        Some(Value::String(name)) => NameField::Plain(name.clone()),
        Some(Value::Object(map)) => NameField::Localized(
            map.iter()
                .filter_map(|(lang, name)| Some((lang.clone(), name.as_str()?.to_string())))
                .collect(),
        ),
        _ => NameField::Missing,
    }
}

/// Lowercase, trimmed form of a type tag.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// A type field is present when it holds a non-empty string or a list.
fn decode_tags(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::String(tag) => {
            let tag = normalize_tag(tag);
            (!tag.is_empty()).then(|| vec![tag])
        }
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(normalize_tag)
                .filter(|tag| !tag.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

fn decode_types(types: Option<&Value>, legacy: Option<&Value>) -> TypeField {
    match (decode_tags(types), decode_tags(legacy)) {
        (None, None) => TypeField::Neither,
        (Some(types), None) => TypeField::TypesOnly(types),
        (None, Some(legacy)) => TypeField::TypeOnly(legacy),
        (Some(types), Some(legacy)) => TypeField::Both { types, legacy },
    }
}

fn decode_stat_blocks(legacy: Option<&Value>, canonical: Option<&Value>) -> StatBlocks {
    let block = |value: Option<&Value>| value.and_then(Value::as_object).map(StatBlock::decode);
    match (block(legacy), block(canonical)) {
        (None, None) => StatBlocks::Bare,
        (Some(legacy), None) => StatBlocks::LegacyOnly(legacy),
        (None, Some(canonical)) => StatBlocks::CanonicalOnly(canonical),
        (Some(legacy), Some(canonical)) => StatBlocks::Both { legacy, canonical },
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        RawRecord::from_value(&value)
    }
}

impl RawRecord {
    /// Decode a stored document. Non-object documents decode as an empty
    /// record (which then fails normalization for lack of an id).
    pub fn from_value(value: &Value) -> RawRecord {
        let empty = Map::new();
        let doc = value.as_object().unwrap_or(&empty);

        RawRecord {
            id: decode_id(doc.get("id")),
            name: decode_name(doc.get("name")),
            types: decode_types(doc.get("types"), doc.get("type")),
            stats: decode_stat_blocks(doc.get("base"), doc.get("stats")),
            image: doc.get("image").and_then(Value::as_str).map(str::to_string),
            evolutions: doc
                .get("evolutions")
                .and_then(Value::as_array)
                .map(|ids| ids.iter().filter_map(decode_integer).collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"id": 7}), IdField::Integer(7))]
    #[case(json!({"id": "12"}), IdField::Integer(12))]
    #[case(json!({"id": 3.0}), IdField::Integer(3))]
    #[case(json!({"id": null}), IdField::Missing)]
    #[case(json!({}), IdField::Missing)]
    #[case(json!({"id": "abc"}), IdField::Unusable(json!("abc")))]
    #[case(json!({"id": 1.5}), IdField::Unusable(json!(1.5)))]
    fn test_id_shapes(#[case] doc: Value, #[case] expected: IdField) {
        assert_eq!(RawRecord::from_value(&doc).id, expected);
    }

    #[test]
    fn test_type_field_shapes() {
        let raw = RawRecord::from_value(&json!({"type": "Fire"}));
        assert_eq!(raw.types, TypeField::TypeOnly(vec!["fire".to_string()]));

        let raw = RawRecord::from_value(&json!({"types": ["Water", 3, " Ice "]}));
        assert_eq!(
            raw.types,
            TypeField::TypesOnly(vec!["water".to_string(), "ice".to_string()])
        );

        let raw = RawRecord::from_value(&json!({"types": [], "type": ["grass"]}));
        assert_eq!(
            raw.types,
            TypeField::Both {
                types: vec![],
                legacy: vec!["grass".to_string()]
            }
        );

        let raw = RawRecord::from_value(&json!({"type": null, "types": ""}));
        assert_eq!(raw.types, TypeField::Neither);
    }

    #[test]
    fn test_stat_keys_are_classified() {
        let raw = RawRecord::from_value(&json!({
            "base": {"HP": 45, "Sp_Attack": 60, "Sp. Attack": "65", "Unknown": 1, "Speed": -4}
        }));
        let StatBlocks::LegacyOnly(block) = raw.stats else {
            panic!("expected a legacy-only stat block, got {:?}", raw.stats);
        };
        let expected = [
            StatEntry {
                stat: Stat::Hp,
                convention: Convention::Abbreviated,
                value: 45,
            },
            StatEntry {
                stat: Stat::SpecialAttack,
                convention: Convention::Abbreviated,
                value: 60,
            },
            StatEntry {
                stat: Stat::SpecialAttack,
                convention: Convention::Display,
                value: 65,
            },
        ];
        for entry in &expected {
            assert!(block.entries.contains(entry), "missing {:?}", entry);
        }
        assert_eq!(block.entries.len(), 3);
    }

    #[test]
    fn test_fractional_stats_are_treated_as_absent() {
        let raw = RawRecord::from_value(&json!({
            "base": {"HP": 45.5, "Speed": 45.0},
            "stats": {"hp": 45}
        }));
        assert_eq!(
            raw.stats.candidates(Stat::Hp),
            vec![(StatSource::CanonicalCompact, 45)]
        );
        assert_eq!(
            raw.stats.candidates(Stat::Speed),
            vec![(StatSource::LegacyAbbreviated, 45)]
        );

        let raw = RawRecord::from_value(&json!({"base": {"Attack": 49.9}}));
        assert!(raw.stats.candidates(Stat::Attack).is_empty());
    }

    #[test]
    fn test_candidates_follow_priority_order() {
        let raw = RawRecord::from_value(&json!({
            "stats": {"specialAttack": 70, "Sp. Attack": 80},
            "base": {"Sp. Attack": 65, "Sp_Attack": 60}
        }));
        assert_eq!(
            raw.stats.candidates(Stat::SpecialAttack),
            vec![
                (StatSource::LegacyAbbreviated, 60),
                (StatSource::LegacyDisplay, 65),
                (StatSource::CanonicalCompact, 70),
                (StatSource::CanonicalDisplay, 80),
            ]
        );
        assert!(raw.stats.candidates(Stat::Speed).is_empty());
    }

    #[test]
    fn test_non_object_document_decodes_empty() {
        let raw: RawRecord = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(raw.id, IdField::Missing);
        assert_eq!(raw.name, NameField::Missing);
        assert_eq!(raw.types, TypeField::Neither);
        assert_eq!(raw.stats, StatBlocks::Bare);
        assert_eq!(raw.image, None);
        assert!(raw.evolutions.is_empty());
    }

    #[test]
    fn test_name_shapes() {
        let raw = RawRecord::from_value(&json!({"name": "Pikachu"}));
        assert_eq!(raw.name, NameField::Plain("Pikachu".to_string()));

        let raw = RawRecord::from_value(&json!({"name": {"english": "Pikachu", "french": 5}}));
        let NameField::Localized(names) = raw.name else {
            panic!("expected localized names");
        };
        assert_eq!(names.get("english").map(String::as_str), Some("Pikachu"));
        assert!(!names.contains_key("french"));
    }
}
