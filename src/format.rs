//! Result rendering
//!
//! Markdown output quotes every matched field with the matched spans in
//! **bold**; JSON output is the serialized result list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::search::parser::normalize;
use crate::search::{MatchItem, MatchSpan};

/// Wrap the character `spans` of `text` in `**`, merging overlapping and
/// adjacent spans.
pub fn highlight(text: &str, spans: &[MatchSpan]) -> String {
    let mut ranges: Vec<(usize, usize)> = spans
        .iter()
        .filter(|s| s.end > s.start)
        .map(|s| (s.start, s.end))
        .collect();
    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (s, e) in ranges {
        match merged.last_mut() {
            Some(last) if s <= last.1 => last.1 = last.1.max(e),
            _ => merged.push((s, e)),
        }
    }

    // Character offsets to byte offsets; one past the end maps to text.len()
    let mut bytes: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    bytes.push(text.len());
    let byte_at = |c: usize| bytes[c.min(bytes.len() - 1)];

    let mut res = String::with_capacity(text.len() + merged.len() * 4);
    let mut last_idx = 0usize;
    for (s, e) in merged {
        let (s, e) = (byte_at(s), byte_at(e));
        if last_idx < s {
            res.push_str(&text[last_idx..s]);
        }
        res.push_str("**");
        res.push_str(&text[s..e]);
        res.push_str("**");
        last_idx = e;
    }
    if last_idx < text.len() {
        res.push_str(&text[last_idx..]);
    }

    res
}

/// Spans per field name gathered from a result's metadata
fn spans_by_field<T>(result: &MatchItem<T>) -> BTreeMap<String, Vec<MatchSpan>> {
    let mut fields: BTreeMap<String, Vec<MatchSpan>> = BTreeMap::new();
    let Some(metadata) = &result.metadata else {
        return fields;
    };
    for meta in metadata.values().flatten() {
        let (Some(span), Some(field)) = (meta.span, meta.extra.get("field").and_then(|f| f.as_str())) else {
            continue;
        };
        fields.entry(field.to_string()).or_default().push(span);
    }
    fields
}

/// Render results as markdown.
///
/// `title` names each item; `field` returns the raw text of a named field.
pub fn format_markdown<T>(
    results: &[MatchItem<T>],
    query: &str,
    title: impl Fn(&T) -> String,
    field: impl Fn(&T, &str) -> Option<String>,
) -> String {
    let mut md = String::new();
    if query.trim().is_empty() {
        md.push_str(&format!("# All items · {}\n\n", results.len()));
    } else {
        md.push_str(&format!(
            "# Search Results · {} for `{}`\n\n",
            results.len(),
            query.trim()
        ));
    }

    for result in results {
        md.push_str(&format!("## {}\n\n", title(&result.item)));
        md.push_str(&format!("score: {}\n\n", result.score));

        for (name, spans) in spans_by_field(result) {
            let Some(text) = field(&result.item, &name) else {
                continue;
            };
            // Spans index the normalized text the filters saw
            let text = normalize(&text);
            md.push_str(&format!("- {}: {}\n", name, highlight(&text, &spans)));
        }

        md.push_str("\n---\n\n");
    }

    md
}

/// Render results as pretty-printed JSON
pub fn format_json<T: Serialize>(results: &[MatchItem<T>]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
