//! filtersearch
//!
//! Token filter-search: rank items against a free-text query using pluggable
//! per-field filters (substring and subsequence matching) and a cost-like
//! score where 0 is a perfect match.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod records;
pub mod search;
pub mod settings;

pub use error::{Result, SearchError};
pub use search::{
    Filter, FilterSearch, Indexer, MatchItem, MatchMetadata, MatchMode, Strategy, StringFilter,
};
pub use settings::{settings_search, ProjectSetting};
