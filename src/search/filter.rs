//! Filter abstraction and match metadata
//!
//! A [`Filter`] compiles the token list once per results pass and then
//! decides, item by item, whether and how the item matches.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

/// Character range of an accepted match inside a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

/// Record of one successful match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchMetadata {
    /// Cost of the match, 0 is best
    pub score: f64,
    /// Token (or space-joined token list) responsible for the match
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<MatchSpan>,
    /// Filter-specific diagnostics
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl MatchMetadata {
    pub fn new(score: f64, token: impl Into<String>) -> Self {
        Self {
            score,
            token: token.into(),
            span: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = Some(MatchSpan { start, end });
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Matches indexed items of type `I` against a compiled query.
///
/// `matches` returns `None` for "no match". A returned list must never be
/// empty.
pub trait Filter<I> {
    type Query;

    fn parse(&self, tokens: &[String]) -> Result<Self::Query>;

    fn matches(&self, item: &I, query: &Self::Query) -> Option<Vec<MatchMetadata>>;
}

/// A filter with its query already compiled for one results pass
pub(crate) trait PreparedFilter<I> {
    fn matches(&self, item: &I) -> Option<Vec<MatchMetadata>>;
}

/// Object-safe face of [`Filter`] so filters with different query types can
/// live in one collection
pub(crate) trait ErasedFilter<I> {
    fn prepare<'a>(&'a self, tokens: &[String]) -> Result<Box<dyn PreparedFilter<I> + 'a>>;
}

struct Prepared<'a, F, Q> {
    filter: &'a F,
    query: Q,
}

impl<'a, I, F, Q> PreparedFilter<I> for Prepared<'a, F, Q>
where
    F: Filter<I, Query = Q>,
{
    fn matches(&self, item: &I) -> Option<Vec<MatchMetadata>> {
        let found = self.filter.matches(item, &self.query)?;
        debug_assert!(!found.is_empty(), "filter reported a match without metadata");
        if found.is_empty() {
            warn!("filter reported a match without metadata, treating as no match");
            return None;
        }
        Some(found)
    }
}

impl<I, F> ErasedFilter<I> for F
where
    F: Filter<I>,
    F::Query: 'static,
{
    fn prepare<'a>(&'a self, tokens: &[String]) -> Result<Box<dyn PreparedFilter<I> + 'a>> {
        let query = self.parse(tokens)?;
        Ok(Box::new(Prepared { filter: self, query }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Matches items equal to any token
    struct Exact;

    impl Filter<String> for Exact {
        type Query = Vec<String>;

        fn parse(&self, tokens: &[String]) -> Result<Vec<String>> {
            Ok(tokens.to_vec())
        }

        fn matches(&self, item: &String, query: &Vec<String>) -> Option<Vec<MatchMetadata>> {
            query
                .iter()
                .find(|token| *token == item)
                .map(|token| vec![MatchMetadata::new(0.0, token.clone())])
        }
    }

    #[test]
    fn test_prepared_filter_matches() {
        let tokens = vec!["alpha".to_string(), "beta".to_string()];
        let filter = Exact;
        let prepared = filter.prepare(&tokens).unwrap();

        let found = prepared.matches(&"beta".to_string()).unwrap();
        assert_eq!(found, vec![MatchMetadata::new(0.0, "beta")]);
        assert!(prepared.matches(&"gamma".to_string()).is_none());
    }

    #[test]
    fn test_metadata_builders() {
        let meta = MatchMetadata::new(0.25, "abc")
            .with_span(2, 5)
            .with_extra("field", "name");
        assert_eq!(meta.span, Some(MatchSpan { start: 2, end: 5 }));
        assert_eq!(meta.extra.get("field"), Some(&Value::from("name")));
    }

    #[test]
    fn test_metadata_serializes_without_empty_extras() {
        let json = serde_json::to_value(MatchMetadata::new(0.5, "x")).unwrap();
        assert_eq!(json, serde_json::json!({ "score": 0.5, "token": "x" }));
    }
}
