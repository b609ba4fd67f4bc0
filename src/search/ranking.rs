//! Ranking & Scoring System
//!
//! Scores are costs: 0 is a perfect match and larger values rank lower.
//! Every score handed out by the engine is rounded to four significant digits.

/// Significant digits kept on every published score
pub const SCORE_PRECISION: u32 = 4;

/// Round `value` to `digits` significant digits.
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().ceil() as i32;
    let factor = 10f64.powi(digits as i32 - magnitude);
    (value * factor).round() / factor
}

/// Score one pattern match against the field value it was found in.
///
/// All lengths and offsets are in characters.
///
/// - `start` rewards matches found early in the value
/// - `width` penalizes token characters spread across a wide span
/// - `percent` rewards values that are short relative to the token
pub fn score_match(value_len: usize, token_len: usize, match_start: usize, match_len: usize) -> f64 {
    if value_len == 0 {
        return 0.0;
    }
    // Joined multi-token queries can be longer than the span they matched,
    // the clamps keep every term non-negative.
    let width = match_len.saturating_sub(token_len);
    let percent = value_len.saturating_sub(token_len);
    let len = value_len as f64;

    let total = match_start as f64 / len + width as f64 / len + percent as f64 / len;
    round_significant(total / 3.0, SCORE_PRECISION)
}

/// Average of accumulated scores, rounded like every other score.
///
/// Returns `None` when nothing was accumulated.
pub fn average_score(total: f64, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some(round_significant(total / count as f64, SCORE_PRECISION))
}
