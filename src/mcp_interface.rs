//! Catalog operations as text-in, text-out functions for the MCP server.
//!
//! Every function renders its result as pretty-printed JSON in the same
//! shape a host API would send as a response body.

use crate::catalog::Catalog;
use crate::errors::{CatalogError, CatalogResult, EngineError};
use crate::store::RecordStore;
use serde::Serialize;
use serde_json::Value;

/// How a failed tool call should be reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The requested record does not exist.
    NotFound,
    /// The caller sent something unusable.
    InvalidParams,
    /// Anything else.
    Internal,
}

impl FailureKind {
    pub fn of(error: &CatalogError) -> Self {
        match error {
            e if e.is_not_found() => FailureKind::NotFound,
            CatalogError::DuplicateId(_)
            | CatalogError::Json(_)
            | CatalogError::Engine(EngineError::InvalidRecord(_)) => FailureKind::InvalidParams,
            _ => FailureKind::Internal,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> CatalogResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn parse_document(text: &str) -> CatalogResult<Value> {
    Ok(serde_json::from_str(text)?)
}

pub fn list_records_json<S: RecordStore>(catalog: &Catalog<S>) -> CatalogResult<String> {
    to_json(&catalog.list()?)
}

pub fn get_record_json<S: RecordStore>(catalog: &Catalog<S>, id: i64) -> CatalogResult<String> {
    to_json(&catalog.get(id)?)
}

/// `record` is a JSON object in any accepted record shape.
pub fn create_record_json<S: RecordStore>(
    catalog: &Catalog<S>,
    record: &str,
) -> CatalogResult<String> {
    to_json(&catalog.create(parse_document(record)?)?)
}

pub fn update_record_json<S: RecordStore>(
    catalog: &Catalog<S>,
    id: i64,
    patch: &str,
) -> CatalogResult<String> {
    to_json(&catalog.update(id, parse_document(patch)?)?)
}

pub fn delete_record_json<S: RecordStore>(catalog: &Catalog<S>, id: i64) -> CatalogResult<String> {
    to_json(&catalog.delete(id)?)
}

pub fn compare_records_json<S: RecordStore>(
    catalog: &Catalog<S>,
    id1: i64,
    id2: i64,
) -> CatalogResult<String> {
    to_json(&catalog.compare(id1, id2)?)
}

/// One line per record, for terminal output.
pub fn list_summary<S: RecordStore>(catalog: &Catalog<S>) -> CatalogResult<String> {
    let mut output = String::new();
    for record in catalog.list()? {
        output.push_str(&format!(
            "#{:03} {:<12} {:<16} total {}\n",
            record.id,
            record.name.english,
            record.types.join("/"),
            record.stats.total()
        ));
    }
    Ok(output)
}
