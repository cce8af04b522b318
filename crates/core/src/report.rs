//! Summary reporter: strict-parse recovered text and describe its shape.
//!
//! Reporting never fails. A value that does not parse is described by its
//! parse error and a raw preview so an operator can repair it by hand.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::aggregate::AggregateResult;

/// Structural description of one recovered value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// JSON array; `first` previews the first element when there is one.
    Sequence { items: usize, first: Option<String> },
    /// JSON object.
    Mapping { keys: usize },
    /// Any other JSON value (string, number, bool, null).
    Scalar { kind: String },
    /// Not valid JSON.
    Invalid { error: String, preview: String },
}

/// Report line for one marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerSummary {
    pub marker: String,
    pub chars: usize,
    #[serde(flatten)]
    pub shape: Shape,
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn scalar_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Describe the recovered `text` for `marker`.
///
/// The first-element preview keeps the key order of the recovered bytes.
/// Values nested deeper than 128 levels exceed the parser's recursion limit
/// and are reported as `Invalid`.
pub fn summarize(marker: &str, text: &str, preview_chars: usize) -> MarkerSummary {
    let shape = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Shape::Sequence {
            items: items.len(),
            first: items.first().map(|first| {
                let rendered = serde_json::to_string(first).unwrap_or_default();
                truncate_chars(&rendered, preview_chars)
            }),
        },
        Ok(Value::Object(map)) => Shape::Mapping { keys: map.len() },
        Ok(other) => Shape::Scalar { kind: scalar_kind(&other).to_string() },
        Err(err) => {
            Shape::Invalid { error: err.to_string(), preview: truncate_chars(text, preview_chars) }
        }
    };

    MarkerSummary { marker: marker.to_string(), chars: text.chars().count(), shape }
}

/// Summaries for `(marker, text)` pairs, in the order given.
pub fn summarize_texts<'a, I>(entries: I, preview_chars: usize) -> Vec<MarkerSummary>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries.into_iter().map(|(marker, text)| summarize(marker, text, preview_chars)).collect()
}

/// One summary per marker stored in `result`; absent markers produce nothing.
pub fn summarize_all(result: &AggregateResult, preview_chars: usize) -> Vec<MarkerSummary> {
    summarize_texts(result.texts(), preview_chars)
}

impl fmt::Display for MarkerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} chars", self.marker, self.chars)?;
        match &self.shape {
            Shape::Sequence { items, first } => {
                write!(f, "\n  -> {items} items")?;
                if let Some(first) = first {
                    write!(f, "\n  -> First: {first}")?;
                }
            }
            Shape::Mapping { keys } => write!(f, "\n  -> {keys} keys")?,
            Shape::Scalar { kind } => write!(f, "\n  -> {kind} value")?,
            Shape::Invalid { error, preview } => {
                write!(f, "\n  -> parse error: {error}")?;
                write!(f, "\n  -> raw start: {preview}")?;
            }
        }
        Ok(())
    }
}
