//! Seed import: load a JSON array of records into a store.

use crate::engine::normalize_value;
use crate::errors::{CatalogError, CatalogResult, EngineError};
use crate::store::RecordStore;
use serde_json::Value;
use std::path::Path;

/// Settings applied to every imported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Prefix for image references that are not already absolute URLs.
    pub asset_base_url: String,
}

impl ImportOptions {
    pub fn new(asset_base_url: impl Into<String>) -> Self {
        Self {
            asset_base_url: asset_base_url.into(),
        }
    }
}

/// Absolute URL for an image reference stored as a relative path.
pub fn resolve_image_url(image: &str, base_url: &str) -> String {
    if image.is_empty() || image.starts_with("http://") || image.starts_with("https://") {
        return image.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if image.starts_with('/') {
        format!("{}{}", base, image)
    } else {
        format!("{}/{}", base, image)
    }
}

/// Prepare one seed document for storage, returning its id.
fn prepare(index: usize, mut doc: Value, options: &ImportOptions) -> CatalogResult<(i64, Value)> {
    let id = match normalize_value(&doc) {
        Ok(record) => record.id,
        Err(EngineError::InvalidRecord(reason)) => {
            return Err(EngineError::invalid_record(format!("entry {}: {}", index, reason)).into())
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(Value::String(image)) = doc.get_mut("image") {
        *image = resolve_image_url(image, &options.asset_base_url);
    }
    Ok((id, doc))
}

/// Replace the store contents with the records in a JSON array.
///
/// All-or-nothing: any entry without a usable id, or two entries sharing an
/// id, aborts the import before the store is touched.
pub fn import_records<S: RecordStore + ?Sized>(
    store: &S,
    docs: Vec<Value>,
    options: &ImportOptions,
) -> CatalogResult<usize> {
    let mut prepared = Vec::with_capacity(docs.len());
    let mut seen = std::collections::BTreeSet::new();
    for (index, doc) in docs.into_iter().enumerate() {
        let (id, doc) = prepare(index, doc, options)?;
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId(id));
        }
        prepared.push((id, doc));
    }

    let count = prepared.len();
    store.replace_all(prepared)?;
    log::info!("Imported {} Pokemon", count);
    Ok(count)
}

/// Read a seed file and import it.
pub fn import_file<S: RecordStore + ?Sized>(
    store: &S,
    path: &Path,
    options: &ImportOptions,
) -> CatalogResult<usize> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let docs = match serde_json::from_str::<Value>(&content)? {
        Value::Array(docs) => docs,
        _ => {
            return Err(CatalogError::Config(format!(
                "seed file {} must contain a JSON array",
                path.display()
            )))
        }
    };
    log::debug!("Read {} seed records from {}", docs.len(), path.display());
    import_records(store, docs, options)
}
