use crate::engine::{compare, normalize_value, TypeChart};
use crate::errors::{CatalogError, CatalogResult, EngineError};
use crate::store::RecordStore;
use schema::{CanonicalRecord, ComparisonResult};
use serde_json::{Map, Value};
use std::sync::Arc;

/// CRUD and comparison over a record store.
///
/// Documents are stored as written and normalized on every read, so
/// legacy shapes already in the store are served in canonical form without
/// a migration.
#[derive(Debug)]
pub struct Catalog<S: RecordStore> {
    store: S,
    chart: Arc<TypeChart>,
}

impl<S: RecordStore> Catalog<S> {
    pub fn new(store: S, chart: Arc<TypeChart>) -> Self {
        Self { store, chart }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every record that normalizes, in ascending id order.
    pub fn list(&self) -> CatalogResult<Vec<CanonicalRecord>> {
        let mut records = Vec::new();
        for (id, doc) in self.store.list()? {
            match normalize_value(&doc) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping stored record #{}: {}", id, e),
            }
        }
        Ok(records)
    }

    pub fn get(&self, id: i64) -> CatalogResult<CanonicalRecord> {
        match self.store.find_by_id(id)? {
            Some(doc) => Ok(normalize_value(&doc)?),
            None => Err(CatalogError::NotFound(id)),
        }
    }

    /// Store a new document. It must carry an id not already in use.
    pub fn create(&self, doc: Value) -> CatalogResult<CanonicalRecord> {
        let record = normalize_value(&doc)?;
        self.store.insert(record.id, doc)?;
        log::info!("Created Pokemon #{}", record.id);
        Ok(record)
    }

    /// Merge the top-level fields of `patch` into the stored document.
    ///
    /// The record id is fixed by `id`; an `id` in the patch is ignored.
    pub fn update(&self, id: i64, patch: Value) -> CatalogResult<CanonicalRecord> {
        let Value::Object(fields) = patch else {
            return Err(EngineError::invalid_record("update body must be a JSON object").into());
        };
        let mut merged = match self.store.find_by_id(id)? {
            Some(Value::Object(stored)) => stored,
            Some(_) => Map::new(),
            None => return Err(CatalogError::NotFound(id)),
        };
        for (key, value) in fields {
            if key != "id" {
                merged.insert(key, value);
            }
        }
        merged.insert("id".to_string(), Value::from(id));
        let doc = Value::Object(merged);

        let record = normalize_value(&doc)?;
        self.store.update(id, doc)?;
        log::info!("Updated Pokemon #{}", id);
        Ok(record)
    }

    /// Remove a record, returning its last normalized form.
    pub fn delete(&self, id: i64) -> CatalogResult<CanonicalRecord> {
        let doc = self.store.delete(id)?;
        log::info!("Deleted Pokemon #{}", id);
        Ok(normalize_value(&doc)?)
    }

    /// Head-to-head comparison of two stored records.
    pub fn compare(&self, id1: i64, id2: i64) -> CatalogResult<ComparisonResult> {
        let first = self.lookup(id1)?;
        let second = self.lookup(id2)?;
        let result = compare(first.as_ref(), second.as_ref(), &self.chart)?;
        log::debug!(
            "Compared #{} and #{}: {} ({} to {})",
            id1,
            id2,
            result.overall_winner,
            result.scores.pokemon1,
            result.scores.pokemon2
        );
        Ok(result)
    }

    fn lookup(&self, id: i64) -> CatalogResult<Option<CanonicalRecord>> {
        self.store
            .find_by_id(id)?
            .map(|doc| normalize_value(&doc))
            .transpose()
            .map_err(CatalogError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use schema::Winner;
    use serde_json::json;

    fn catalog() -> Catalog<MemoryStore> {
        let chart = Arc::new(TypeChart::builtin().unwrap());
        let catalog = Catalog::new(MemoryStore::new(), chart);
        catalog
            .create(json!({
                "id": 4,
                "name": {"french": "Salamèche", "english": "Charmander"},
                "type": ["Fire"],
                "base": {"HP": 39, "Attack": 52, "Defense": 43, "Sp. Attack": 60, "Sp. Defense": 50, "Speed": 65}
            }))
            .unwrap();
        catalog
            .create(json!({
                "id": 7,
                "name": {"french": "Carapuce", "english": "Squirtle"},
                "types": ["water"],
                "stats": {"hp": 44, "attack": 48, "defense": 65, "specialAttack": 50, "specialDefense": 64, "speed": 43}
            }))
            .unwrap();
        catalog
    }

    #[test]
    fn test_get_normalizes_stored_document() {
        let record = catalog().get(4).unwrap();
        assert_eq!(record.types, vec!["fire"]);
        assert_eq!(record.stats.special_attack, 60);
        assert_eq!(record.name.japanese, "");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let err = catalog().get(999).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(999)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_rejects_duplicates_and_missing_ids() {
        let catalog = catalog();
        assert!(matches!(
            catalog.create(json!({"id": 4})),
            Err(CatalogError::DuplicateId(4))
        ));
        assert!(matches!(
            catalog.create(json!({"name": {"english": "Missingno"}})),
            Err(CatalogError::Engine(EngineError::InvalidRecord(_)))
        ));
    }

    #[test]
    fn test_update_merges_top_level_fields() {
        let catalog = catalog();
        let updated = catalog
            .update(4, json!({"id": 99, "image": "/assets/4.png", "stats": {"speed": 70}}))
            .unwrap();

        assert_eq!(updated.id, 4);
        assert_eq!(updated.image, "/assets/4.png");
        // The legacy block still wins the priority order for speed.
        assert_eq!(updated.stats.speed, 65);
        assert_eq!(updated.name.english, "Charmander");
        assert!(catalog.get(99).is_err());
    }

    #[test]
    fn test_update_missing_and_bad_body() {
        let catalog = catalog();
        assert!(matches!(
            catalog.update(1, json!({"image": "x"})),
            Err(CatalogError::NotFound(1))
        ));
        assert!(matches!(
            catalog.update(4, json!(["image"])),
            Err(CatalogError::Engine(EngineError::InvalidRecord(_)))
        ));
    }

    #[test]
    fn test_delete_returns_record() {
        let catalog = catalog();
        let deleted = catalog.delete(7).unwrap();
        assert_eq!(deleted.name.english, "Squirtle");
        assert!(matches!(catalog.get(7), Err(CatalogError::NotFound(7))));
        assert!(matches!(catalog.delete(7), Err(CatalogError::NotFound(7))));
    }

    #[test]
    fn test_list_skips_unreadable_documents() {
        let catalog = catalog();
        catalog.store().insert(500, json!({"id": "corrupt"})).unwrap();
        let ids: Vec<i64> = catalog.list().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 7]);
    }

    #[test]
    fn test_compare_by_id() {
        let result = catalog().compare(4, 7).unwrap();
        assert_eq!(result.pokemon1.id, 4);
        assert_eq!(result.pokemon2.id, 7);
        assert_eq!(
            result.type_advantage.pokemon2.effective,
            vec!["water is super effective against fire"]
        );
        // Charmander wins attack, special attack and speed; Squirtle wins
        // hp, defense and special defense. Types decide it.
        assert_eq!(result.scores.pokemon1, 1);
        assert_eq!(result.scores.pokemon2, 5);
        assert_eq!(result.overall_winner, Winner::Record(7));
    }

    #[test]
    fn test_compare_with_missing_record() {
        let err = catalog().compare(4, 404).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(
            err,
            CatalogError::Engine(EngineError::RecordMissing(_))
        ));
    }
}
