//! String-field filters
//!
//! Both filters compile the token list into one AND pattern (every token, in
//! order, separated by lazy gaps) and one OR pattern per distinct token.
//! They differ in how a single token becomes a pattern fragment:
//!
//! - [`MatchMode::Sequential`] matches the token as a literal substring
//! - [`MatchMode::Wildcard`] matches the token's characters as a subsequence,
//!   so "ABC" finds "All Bout Camels"
//!
//! Matching is case-insensitive.

use regex::{Match, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::filter::{Filter, MatchMetadata};
use super::indexer::FieldLookup;
use super::parser::{distinct_tokens, escape, escape_char_into};
use super::ranking::score_match;
use crate::error::Result;

/// Lazy "anything, as little as possible"
const GAP: &str = ".*?";

/// How a token is turned into a pattern fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Sequential,
    Wildcard,
}

impl MatchMode {
    fn fragment(self, token: &str) -> String {
        match self {
            MatchMode::Sequential => escape(token),
            MatchMode::Wildcard => {
                let mut fragment = String::with_capacity(token.len() * 4);
                for (i, ch) in token.chars().enumerate() {
                    if i > 0 {
                        fragment.push_str(GAP);
                    }
                    escape_char_into(ch, &mut fragment);
                }
                fragment
            }
        }
    }
}

/// A compiled pattern with the token text it stands for
#[derive(Debug, Clone)]
pub struct TokenPattern {
    pub token: String,
    pub pattern: Regex,
}

impl TokenPattern {
    fn compile(token: String, source: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Self { token, pattern })
    }
}

/// Query compiled by a [`StringFilter`]
#[derive(Debug, Clone)]
pub struct StringQuery {
    /// All tokens in order
    pub all: TokenPattern,
    /// One pattern per distinct token
    pub each: Vec<TokenPattern>,
}

/// Filter over one named string field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFilter {
    field: String,
    mode: MatchMode,
}

impl StringFilter {
    pub fn new(field: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            field: field.into(),
            mode,
        }
    }

    /// Substring matching on `field`
    pub fn sequential(field: impl Into<String>) -> Self {
        Self::new(field, MatchMode::Sequential)
    }

    /// Subsequence matching on `field`
    pub fn wildcard(field: impl Into<String>) -> Self {
        Self::new(field, MatchMode::Wildcard)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    fn metadata(&self, value: &str, token: &str, found: Match<'_>) -> MatchMetadata {
        let start = value[..found.start()].chars().count();
        let len = found.as_str().chars().count();
        let score = score_match(value.chars().count(), token.chars().count(), start, len);

        MatchMetadata::new(score, token)
            .with_span(start, start + len)
            .with_extra("field", self.field.as_str())
    }

    fn match_each(&self, value: &str, each: &[TokenPattern]) -> Vec<MatchMetadata> {
        match self.mode {
            MatchMode::Sequential => each
                .iter()
                .filter_map(|p| p.pattern.find(value).map(|m| self.metadata(value, &p.token, m)))
                .collect(),
            MatchMode::Wildcard => {
                // Accepted matches must not overlap and must run left to right
                let mut last_index = 0;
                let mut found = Vec::new();
                for p in each {
                    if let Some(m) = p.pattern.find(value) {
                        if m.start() >= last_index {
                            last_index = m.end();
                            found.push(self.metadata(value, &p.token, m));
                        }
                    }
                }
                found
            }
        }
    }
}

impl<I: FieldLookup> Filter<I> for StringFilter {
    type Query = StringQuery;

    fn parse(&self, tokens: &[String]) -> Result<StringQuery> {
        let fragments: Vec<String> = tokens.iter().map(|t| self.mode.fragment(t)).collect();
        let all = TokenPattern::compile(tokens.join(" "), &fragments.join(GAP))?;

        let each = distinct_tokens(tokens)
            .into_iter()
            .map(|token| TokenPattern::compile(token.to_string(), &self.mode.fragment(token)))
            .collect::<Result<Vec<_>>>()?;

        Ok(StringQuery { all, each })
    }

    fn matches(&self, item: &I, query: &StringQuery) -> Option<Vec<MatchMetadata>> {
        let value = item.field(&self.field).filter(|v| !v.is_empty())?;

        if let Some(m) = query.all.pattern.find(value) {
            trace!(field = %self.field, token = %query.all.token, "all tokens matched");
            return Some(vec![self.metadata(value, &query.all.token, m)]);
        }

        let found = self.match_each(value, &query.each);
        if found.is_empty() {
            None
        } else {
            trace!(field = %self.field, matches = found.len(), "partial token match");
            Some(found)
        }
    }
}
