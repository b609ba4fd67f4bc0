//! Query Tokenizer & Pattern Escaping
//!
//! Splits free-text queries into tokens and prepares literal text for
//! embedding in compiled patterns.

use unicode_normalization::UnicodeNormalization;

/// Characters that carry meaning inside a regular expression
const PATTERN_METACHARACTERS: &[char] = &[
    '$', '(', ')', '*', '+', '.', '?', '[', '\\', ']', '^', '{', '|', '}',
];

/// Split a query into whitespace-delimited tokens.
///
/// The query is trimmed first; an empty query yields no tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

/// Tokens with later repeats removed, first-seen order kept
pub fn distinct_tokens(tokens: &[String]) -> Vec<&str> {
    let mut seen = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !seen.contains(&token.as_str()) {
            seen.push(token.as_str());
        }
    }
    seen
}

/// Escape pattern metacharacters so `text` matches literally
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        escape_char_into(ch, &mut escaped);
    }
    escaped
}

/// Escape a single character, appending it to `out`
pub fn escape_char_into(ch: char, out: &mut String) {
    if PATTERN_METACHARACTERS.contains(&ch) {
        out.push('\\');
    }
    out.push(ch);
}

/// Normalize field text for matching (Unicode NFC)
pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>()
}
