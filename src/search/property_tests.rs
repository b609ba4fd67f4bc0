use proptest::prelude::*;
use regex::Regex;

use super::{escape, tokenize, FieldLookup, FilterSearch, Indexer, Strategy, StringFilter};

struct Text(String);

impl FieldLookup for Text {
    fn field(&self, name: &str) -> Option<&str> {
        (name == "text").then_some(self.0.as_str())
    }
}

struct TextIndexer;

impl Indexer<String> for TextIndexer {
    type Indexed = Text;

    fn index(&self, item: &String) -> Text {
        Text(item.clone())
    }

    fn extract(&self, indexed: &Text) -> String {
        indexed.0.clone()
    }
}

fn search(items: Vec<String>, query: &str, strategy: Strategy) -> FilterSearch<String, TextIndexer> {
    FilterSearch::new(items, TextIndexer)
        .with_filter("wild", StringFilter::wildcard("text"))
        .and_then(|s| s.with_filter("seq", StringFilter::sequential("text")))
        .map(|s| s.with_query(query).with_strategy(strategy))
        .unwrap()
}

// Property test: an escaped pattern matches its source text and nothing else
proptest! {
    #[test]
    fn escaped_pattern_matches_only_itself(s in "\\PC{0,16}", t in "\\PC{0,16}") {
        let pattern = Regex::new(&format!("^{}$", escape(&s))).unwrap();
        prop_assert!(pattern.is_match(&s));
        prop_assert_eq!(pattern.is_match(&t), s == t);
    }
}

// Property test: tokens are non-empty, whitespace-free and cover the query
proptest! {
    #[test]
    fn tokens_are_trimmed_pieces(query in "[a-z \\t]{0,24}") {
        let tokens = tokenize(&query);
        for token in &tokens {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.chars().any(char::is_whitespace));
        }
        let joined: String = query.split_whitespace().collect::<Vec<_>>().join(" ");
        prop_assert_eq!(tokens.join(" "), joined);
    }
}

// Property test: results are sorted, scores are finite and non-negative
proptest! {
    #[test]
    fn results_are_ranked(
        items in proptest::collection::vec("[a-e ]{0,12}", 0..12),
        query in "[a-e ]{0,6}",
        use_any in any::<bool>(),
    ) {
        let strategy = if use_any { Strategy::Any } else { Strategy::Every };
        let search = search(items.clone(), &query, strategy);
        let results = search.results().unwrap();

        prop_assert!(results.len() <= items.len());
        for pair in results.windows(2) {
            prop_assert!(pair[0].score <= pair[1].score);
        }
        for result in &results {
            prop_assert!(result.score.is_finite() && result.score >= 0.0);
            prop_assert!(items.contains(&result.item));
            let metadata = result.metadata.as_ref().unwrap();
            prop_assert!(!metadata.is_empty());
            for found in metadata.values() {
                prop_assert!(!found.is_empty());
                for meta in found {
                    prop_assert!(meta.score.is_finite() && meta.score >= 0.0);
                }
            }
        }
    }
}

// Property test: "any" never returns fewer items than "every"
proptest! {
    #[test]
    fn any_is_superset_of_every(
        items in proptest::collection::vec("[a-e ]{1,12}", 1..10),
        query in "[a-e]{1,3}( [a-e]{1,3}){0,2}",
    ) {
        let every = search(items.clone(), &query, Strategy::Every).results().unwrap();
        let any = search(items, &query, Strategy::Any).results().unwrap();
        prop_assert!(every.len() <= any.len());
    }
}
