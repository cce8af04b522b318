//! Key-anchored value extraction.
//!
//! Table files are compressed and framed, but Local Storage values are often
//! stored verbatim next to their key. For each occurrence of a marker we look
//! a bounded distance ahead for the first bracketed span and treat it as the
//! value. This is a heuristic, not a parser:
//!
//! - the match is lazy, so it ends at the *first* closing bracket of the same
//!   type as the opening one; nested brackets of that type truncate it;
//! - any bracketed fragment after the marker qualifies, JSON or not;
//! - truncated records simply produce no match.
//!
//! Callers validate candidates later (see [`crate::report`]). Everything is
//! bounded by [`ExtractLimits`] so one occurrence never costs more than a
//! fixed window of work.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ExtractLimits;
use crate::table::TableFile;

/// First `[...]` or `{...}` span, shortest closing, across newlines.
static RE_BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(\[.*?\]|\{.*?\})").expect("valid bracketed value regex"));

/// One extracted span believed to hold a value for `marker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub marker: String,
    pub text: String,
    /// Length of `text` in characters.
    pub chars: usize,
    pub source: TableFile,
}

impl Candidate {
    pub fn new(marker: impl Into<String>, text: impl Into<String>, source: TableFile) -> Self {
        let text = text.into();
        let chars = text.chars().count();
        Self { marker: marker.into(), text, chars, source }
    }
}

/// Longest prefix of `text` holding at most `n` characters.
fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Find the bracketed value in the text that follows a marker.
///
/// Only the first `limits.value_window_chars` characters of `after_marker` are
/// searched. Returns `None` when no span closes inside that window or the
/// span is not longer than `limits.min_value_chars`.
pub fn find_value_span<'t>(after_marker: &'t str, limits: &ExtractLimits) -> Option<&'t str> {
    let window = take_chars(after_marker, limits.value_window_chars);
    let value = RE_BRACKETED.find(window)?.as_str();
    (value.chars().count() > limits.min_value_chars).then_some(value)
}

/// Byte offsets of every occurrence of `marker` in `text`, overlaps included.
pub fn occurrences<'t, 'm>(text: &'t str, marker: &'m str) -> Occurrences<'t, 'm> {
    Occurrences { text, marker, from: 0 }
}

/// Iterator returned by [`occurrences`].
#[derive(Debug, Clone)]
pub struct Occurrences<'t, 'm> {
    text: &'t str,
    marker: &'m str,
    from: usize,
}

impl Iterator for Occurrences<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.from > self.text.len() {
            return None;
        }
        let pos = self.from + self.text[self.from..].find(self.marker)?;
        // Resume one character past the start, not past the match.
        let step = self.text[pos..].chars().next().map_or(1, char::len_utf8);
        self.from = pos + step;
        Some(pos)
    }
}

/// Value following the marker occurrence at byte offset `at`, if any.
pub fn value_at<'t>(text: &'t str, at: usize, marker: &str, limits: &ExtractLimits) -> Option<&'t str> {
    let window = take_chars(text.get(at..)?, limits.window_chars);
    let after_marker = window.get(marker.len()..).unwrap_or("");
    find_value_span(after_marker, limits)
}

/// All values found after occurrences of `marker` in `text`, in text order.
pub fn extract_values<'t>(text: &'t str, marker: &str, limits: &ExtractLimits) -> Vec<&'t str> {
    occurrences(text, marker).filter_map(|at| value_at(text, at, marker, limits)).collect()
}

/// Candidates for `marker` in a decoded table file.
pub fn extract_candidates(
    text: &str,
    marker: &str,
    limits: &ExtractLimits,
    source: &TableFile,
) -> Vec<Candidate> {
    extract_values(text, marker, limits)
        .into_iter()
        .map(|value| Candidate::new(marker, value, source.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_chars_counts_characters_not_bytes() {
        assert_eq!(take_chars("héllo", 2), "hé");
        assert_eq!(take_chars("abc", 10), "abc");
        assert_eq!(take_chars("abc", 0), "");
    }

    #[test]
    fn occurrences_overlap() {
        let found: Vec<usize> = occurrences("aaaa", "aa").collect();
        assert_eq!(found, vec![0, 1, 2]);
    }

    #[test]
    fn occurrences_step_over_multibyte_start() {
        let found: Vec<usize> = occurrences("éé-éé", "éé").collect();
        assert_eq!(found, vec![0, 5]);
    }
}
