//! Token filter-search engine
//!
//! Items are indexed, matched field by field against a tokenized query by
//! pluggable filters, and ranked by a cost-like score where 0 is best.

pub mod engine;
pub mod filter;
pub mod indexer;
pub mod parser;
pub mod ranking;
pub mod string_filter;

#[cfg(test)]
mod property_tests;

pub use engine::{FilterSearch, MatchItem, Strategy};
pub use filter::{Filter, MatchMetadata, MatchSpan};
pub use indexer::{FieldLookup, Indexer};
pub use parser::{escape, tokenize};
pub use string_filter::{MatchMode, StringFilter, StringQuery};
