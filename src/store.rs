//! Record storage seam.
//!
//! The catalog never assumes anything about how documents are stored; it
//! talks to a [`RecordStore`]. Documents are kept exactly as written
//! (legacy shapes included) and only normalized on the way out.

use crate::errors::{CatalogError, CatalogResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::RwLock;

pub trait RecordStore: Send + Sync {
    /// The stored document with this id, if any.
    fn find_by_id(&self, id: i64) -> CatalogResult<Option<Value>>;

    /// Every stored document, ordered by id.
    fn list(&self) -> CatalogResult<Vec<(i64, Value)>>;

    /// Store a new document. Fails with `DuplicateId` if the id is taken.
    fn insert(&self, id: i64, doc: Value) -> CatalogResult<()>;

    /// Overwrite an existing document. Fails with `NotFound` if absent.
    fn update(&self, id: i64, doc: Value) -> CatalogResult<()>;

    /// Remove and return a document. Fails with `NotFound` if absent.
    fn delete(&self, id: i64) -> CatalogResult<Value>;

    /// Drop every document and store the given ones instead.
    fn replace_all(&self, docs: Vec<(i64, Value)>) -> CatalogResult<()>;

    fn len(&self) -> CatalogResult<usize> {
        Ok(self.list()?.len())
    }
}

/// In-process store backed by an ordered map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<i64, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CatalogResult<std::sync::RwLockReadGuard<'_, BTreeMap<i64, Value>>> {
        self.docs
            .read()
            .map_err(|_| CatalogError::Storage("record store lock poisoned".to_string()))
    }

    fn write(&self) -> CatalogResult<std::sync::RwLockWriteGuard<'_, BTreeMap<i64, Value>>> {
        self.docs
            .write()
            .map_err(|_| CatalogError::Storage("record store lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn find_by_id(&self, id: i64) -> CatalogResult<Option<Value>> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn list(&self) -> CatalogResult<Vec<(i64, Value)>> {
        Ok(self
            .read()?
            .iter()
            .map(|(id, doc)| (*id, doc.clone()))
            .collect())
    }

    fn insert(&self, id: i64, doc: Value) -> CatalogResult<()> {
        let mut docs = self.write()?;
        if docs.contains_key(&id) {
            return Err(CatalogError::DuplicateId(id));
        }
        docs.insert(id, doc);
        Ok(())
    }

    fn update(&self, id: i64, doc: Value) -> CatalogResult<()> {
        let mut docs = self.write()?;
        match docs.get_mut(&id) {
            Some(slot) => {
                *slot = doc;
                Ok(())
            }
            None => Err(CatalogError::NotFound(id)),
        }
    }

    fn delete(&self, id: i64) -> CatalogResult<Value> {
        self.write()?.remove(&id).ok_or(CatalogError::NotFound(id))
    }

    fn replace_all(&self, docs: Vec<(i64, Value)>) -> CatalogResult<()> {
        let mut stored = self.write()?;
        stored.clear();
        stored.extend(docs);
        Ok(())
    }

    fn len(&self) -> CatalogResult<usize> {
        Ok(self.read()?.len())
    }
}
