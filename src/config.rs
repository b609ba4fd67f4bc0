//! Search configuration
//!
//! Stored as JSON under the platform config directory. A missing file means
//! defaults, which search `id` and `name` by wildcard and `description` by
//! substring.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::search::{MatchMode, Strategy};

/// One configured filter: which field it reads and how it matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub name: String,
    pub field: String,
    pub kind: MatchMode,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, field: impl Into<String>, kind: MatchMode) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Maximum number of printed results
    pub limit: Option<usize>,
    pub filters: Vec<FilterSpec>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Every,
            limit: None,
            filters: vec![
                FilterSpec::new("id", "id", MatchMode::Wildcard),
                FilterSpec::new("name", "name", MatchMode::Wildcard),
                FilterSpec::new("description", "description", MatchMode::Sequential),
            ],
        }
    }
}

/// Get the path to the default configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("filtersearch").join("config.json"))
}

/// Load configuration from `path`, or from the default location
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };

    if !path.exists() {
        return Ok(SearchConfig::default());
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SearchConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    Ok(config)
}

/// Save the configuration to `path`
pub fn save_config(config: &SearchConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let data = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, data).context("Failed to write config file")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.filters.len(), 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = SearchConfig {
            strategy: Strategy::Any,
            limit: Some(5),
            filters: vec![FilterSpec::new("title", "title", MatchMode::Sequential)],
        };

        save_config(&config, &path).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "strategy": "any" }"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.strategy, Strategy::Any);
        assert_eq!(config.filters, SearchConfig::default().filters);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "strategy": "sometimes" }"#).unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_filter_kind_names() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{ "name": "n", "field": "f", "kind": "wildcard" }"#).unwrap();
        assert_eq!(spec.kind, MatchMode::Wildcard);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        save_config(&SearchConfig::default(), &path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
