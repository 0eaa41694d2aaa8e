use crate::engine::raw::{IdField, NameField, RawRecord, StatBlocks, TypeField};
use crate::errors::{EngineError, EngineResult};
use schema::{BaseStats, CanonicalRecord, LocalizedName, Stat};

/// Reconcile a decoded stored record into the canonical shape.
///
/// Fails only when no integer id can be determined. Everything else is
/// defaulted: missing names become empty strings, missing type fields an
/// empty list, missing stats zero.
pub fn normalize(raw: &RawRecord) -> EngineResult<CanonicalRecord> {
    let id = match &raw.id {
        IdField::Integer(id) => *id,
        IdField::Missing => return Err(EngineError::invalid_record("record has no id")),
        IdField::Unusable(value) => {
            return Err(EngineError::invalid_record(format!(
                "id {} is not an integer",
                value
            )))
        }
    };

    Ok(CanonicalRecord {
        id,
        name: normalize_name(&raw.name),
        types: normalize_types(&raw.types),
        stats: reconcile_stats(id, &raw.stats),
        image: raw.image.clone().unwrap_or_default(),
        evolutions: raw.evolutions.clone(),
    })
}

/// Decode and normalize a stored JSON document in one step.
pub fn normalize_value(value: &serde_json::Value) -> EngineResult<CanonicalRecord> {
    normalize(&RawRecord::from_value(value))
}

fn normalize_name(name: &NameField) -> LocalizedName {
    let mut localized = LocalizedName::default();
    match name {
        NameField::Missing => {}
        // A bare name predates translations and was always the English one.
        NameField::Plain(english) => localized.english = english.clone(),
        NameField::Localized(names) => {
            for language in LocalizedName::LANGUAGES {
                if let (Some(value), Some(slot)) =
                    (names.get(language), localized.slot_mut(language))
                {
                    *slot = value.clone();
                }
            }
        }
    }
    localized
}

fn normalize_types(types: &TypeField) -> Vec<String> {
    match types {
        TypeField::Neither => Vec::new(),
        TypeField::TypesOnly(tags) | TypeField::TypeOnly(tags) => tags.clone(),
        // `types` is authoritative; the legacy field is overwritten.
        TypeField::Both { types, .. } => types.clone(),
    }
}

/// Pick the first non-zero candidate per stat, in source priority order.
///
/// A stored zero is indistinguishable from an absent value here: it never
/// overrides a non-zero candidate from a lower-priority source.
fn reconcile_stats(id: i64, blocks: &StatBlocks) -> BaseStats {
    let mut stats = BaseStats::default();
    for stat in Stat::all() {
        let candidates = blocks.candidates(stat);
        let chosen = candidates.iter().find(|(_, value)| *value != 0).copied();

        if let Some((source, value)) = chosen {
            let disagreeing = candidates
                .iter()
                .filter(|(_, other)| *other != 0 && *other != value)
                .count();
            if disagreeing > 0 {
                log::debug!(
                    "Pokemon #{} {}: kept {} from {:?}, {} conflicting value(s) dropped",
                    id,
                    stat.compact_key(),
                    value,
                    source,
                    disagreeing
                );
            }
            stats.set(stat, value);
        }
    }
    stats
}

