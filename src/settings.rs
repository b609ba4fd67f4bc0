//! Project settings search
//!
//! Wires the filter-search engine to [`ProjectSetting`] items: wildcard
//! matching on `id` and `name`, substring matching on `description`, and the
//! `every` strategy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::search::parser::normalize;
use crate::search::{FieldLookup, FilterSearch, Indexer, Strategy, StringFilter};

/// One configurable project setting.
///
/// Only the text fields take part in matching; the value is carried along
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSetting {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ProjectSetting {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            value: None,
        }
    }
}

/// Indexed form of a [`ProjectSetting`] with normalized text fields
#[derive(Debug, Clone)]
pub struct IndexedSetting {
    setting: ProjectSetting,
    id: String,
    name: String,
    description: String,
}

impl FieldLookup for IndexedSetting {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingIndexer;

impl Indexer<ProjectSetting> for SettingIndexer {
    type Indexed = IndexedSetting;

    fn index(&self, item: &ProjectSetting) -> IndexedSetting {
        IndexedSetting {
            setting: item.clone(),
            id: normalize(&item.id),
            name: normalize(&item.name),
            description: normalize(&item.description),
        }
    }

    fn extract(&self, indexed: &IndexedSetting) -> ProjectSetting {
        indexed.setting.clone()
    }
}

pub type SettingsSearch = FilterSearch<ProjectSetting, SettingIndexer>;

/// Build the settings search over `settings` with an empty query
pub fn settings_search(settings: Vec<ProjectSetting>) -> Result<SettingsSearch> {
    Ok(FilterSearch::new(settings, SettingIndexer)
        .with_filter("id", StringFilter::wildcard("id"))?
        .with_filter("name", StringFilter::wildcard("name"))?
        .with_filter("description", StringFilter::sequential("description"))?
        .with_strategy(Strategy::Every))
}
