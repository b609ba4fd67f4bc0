//! Search over arbitrary JSON records
//!
//! Each top-level scalar field of a JSON object becomes a searchable field.
//! Which fields are searched, and how, comes from the configured
//! [`FilterSpec`] list.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::FilterSpec;
use crate::error::{Result, SearchError};
use crate::search::parser::normalize;
use crate::search::{FieldLookup, FilterSearch, Indexer, Strategy, StringFilter};

/// Indexed form of a JSON record
#[derive(Debug, Clone)]
pub struct IndexedRecord {
    record: Value,
    fields: HashMap<String, String>,
}

impl FieldLookup for IndexedRecord {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordIndexer;

impl Indexer<Value> for RecordIndexer {
    type Indexed = IndexedRecord;

    fn index(&self, item: &Value) -> IndexedRecord {
        let fields: HashMap<String, String> = item
            .as_object()
            .map(|object| {
                object
                    .iter()
                    .filter_map(|(key, value)| field_text(value).map(|text| (key.clone(), text)))
                    .collect()
            })
            .unwrap_or_default();

        IndexedRecord {
            record: item.clone(),
            fields,
        }
    }

    fn extract(&self, indexed: &IndexedRecord) -> Value {
        indexed.record.clone()
    }
}

/// Searchable text of a scalar JSON value
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(normalize(s)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub type RecordSearch = FilterSearch<Value, RecordIndexer>;

/// Build a record search from the configured filters
pub fn record_search(records: Vec<Value>, filters: &[FilterSpec], strategy: Strategy) -> Result<RecordSearch> {
    if let Some(bad) = records.iter().position(|r| !r.is_object()) {
        return Err(SearchError::InvalidInput(format!(
            "item {} is not a JSON object",
            bad
        )));
    }

    let mut search = FilterSearch::new(records, RecordIndexer).with_strategy(strategy);
    for spec in filters {
        if spec.name.trim().is_empty() || spec.field.trim().is_empty() {
            return Err(SearchError::InvalidInput(
                "filters need a non-empty name and field".to_string(),
            ));
        }
        search.add_filter(spec.name.clone(), StringFilter::new(spec.field.clone(), spec.kind))?;
    }
    Ok(search)
}

/// Parse a JSON document holding an array of records
pub fn parse_records(json: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => Ok(items),
        _ => Err(SearchError::InvalidInput(
            "expected a JSON array of objects".to_string(),
        )),
    }
}
