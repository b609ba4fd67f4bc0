//! Search Engine Integration
//!
//! [`FilterSearch`] owns the query, the items and a set of named filters.
//! Results are pulled: every call to [`FilterSearch::results`] re-tokenizes
//! the query, re-indexes the items and re-runs every filter.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::filter::{ErasedFilter, Filter, MatchMetadata, PreparedFilter};
use super::indexer::Indexer;
use super::parser::{normalize, tokenize};
use super::ranking::average_score;
use crate::error::{Result, SearchError};

/// How multi-token queries decide inclusion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// At least one token must match
    Any,
    /// Every token must match
    #[default]
    Every,
}

impl Strategy {
    fn accepts(self, tokens: &[String], matched: &HashSet<String>) -> bool {
        match self {
            Strategy::Any => tokens.iter().any(|t| matched.contains(t)),
            Strategy::Every => tokens.iter().all(|t| matched.contains(t)),
        }
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(Strategy::Any),
            "every" => Ok(Strategy::Every),
            other => Err(SearchError::InvalidInput(format!(
                "unknown strategy '{}', expected 'any' or 'every'",
                other
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Any => write!(f, "any"),
            Strategy::Every => write!(f, "every"),
        }
    }
}

/// One ranked result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchItem<T> {
    pub item: T,
    /// Average of every metadata score, 0 is best
    pub score: f64,
    /// Metadata per filter name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, Vec<MatchMetadata>>>,
}

struct NamedFilter<I> {
    name: String,
    filter: Box<dyn ErasedFilter<I>>,
}

/// Query-driven ranking over a list of items
pub struct FilterSearch<T, X: Indexer<T>> {
    items: Vec<T>,
    indexer: X,
    filters: Vec<NamedFilter<X::Indexed>>,
    query: String,
    strategy: Strategy,
}

impl<T, X: Indexer<T>> FilterSearch<T, X> {
    /// Create a search with no filters, an empty query and the `every` strategy
    pub fn new(items: Vec<T>, indexer: X) -> Self {
        Self {
            items,
            indexer,
            filters: Vec::new(),
            query: String::new(),
            strategy: Strategy::default(),
        }
    }

    /// Register a filter, builder style
    pub fn with_filter<F>(mut self, name: impl Into<String>, filter: F) -> Result<Self>
    where
        F: Filter<X::Indexed> + 'static,
        F::Query: 'static,
    {
        self.add_filter(name, filter)?;
        Ok(self)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Register a filter under a unique name
    pub fn add_filter<F>(&mut self, name: impl Into<String>, filter: F) -> Result<()>
    where
        F: Filter<X::Indexed> + 'static,
        F::Query: 'static,
    {
        let name = name.into();
        if self.filters.iter().any(|f| f.name == name) {
            return Err(SearchError::DuplicateFilter(name));
        }
        self.filters.push(NamedFilter {
            name,
            filter: Box::new(filter),
        });
        Ok(())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Every filter name suffixed with `:`, for field-qualified query hints
    pub fn filter_names(&self) -> Vec<String> {
        self.filters.iter().map(|f| format!("{}:", f.name)).collect()
    }

    /// Rank the items against the current query.
    ///
    /// An item is kept when the whole trimmed query was matched as one token,
    /// or when the matched tokens satisfy the strategy. Items that matched no
    /// filter are never kept. Results are sorted best first; equal scores keep
    /// item order.
    pub fn results(&self) -> Result<Vec<MatchItem<T>>> {
        // Indexers compose field text, so the query is composed the same way
        let whole_query = normalize(self.query.trim());
        let tokens = tokenize(&whole_query);

        let prepared = self
            .filters
            .iter()
            .map(|f| Ok((f.name.as_str(), f.filter.prepare(&tokens)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut results = Vec::new();
        for item in &self.items {
            let indexed = self.indexer.index(item);

            let mut metadata = BTreeMap::new();
            let mut matched_tokens = HashSet::new();
            let mut total = 0.0;
            let mut count = 0;

            for (name, filter) in &prepared {
                let Some(found) = filter.matches(&indexed) else {
                    continue;
                };
                for meta in &found {
                    matched_tokens.insert(meta.token.clone());
                    total += meta.score;
                    count += 1;
                }
                metadata.insert(name.to_string(), found);
            }

            let included = matched_tokens.contains(whole_query.as_str())
                || self.strategy.accepts(&tokens, &matched_tokens);
            if !included {
                continue;
            }
            let Some(score) = average_score(total, count) else {
                continue;
            };

            results.push(MatchItem {
                item: self.indexer.extract(&indexed),
                score,
                metadata: Some(metadata),
            });
        }

        results.sort_by(|a, b| a.score.total_cmp(&b.score));

        debug!(
            "Query '{}': {} tokens, {} filters, {} of {} items matched",
            whole_query,
            tokens.len(),
            prepared.len(),
            results.len(),
            self.items.len()
        );

        Ok(results)
    }
}

impl<T: Clone, X: Indexer<T>> FilterSearch<T, X> {
    /// Every item in original order with a score of 0
    pub fn unfiltered_results(&self) -> Vec<MatchItem<T>> {
        self.items
            .iter()
            .map(|item| MatchItem {
                item: item.clone(),
                score: 0.0,
                metadata: None,
            })
            .collect()
    }
}
