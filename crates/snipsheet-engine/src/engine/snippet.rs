//! Snippet records and their document-bound form.
//!
//! - [`Span`] - Half-open character range into a document
//! - [`Snippet`] - A typed record extracted upstream (`{ "type", "span", ...fields }`)
//! - [`Highlight`] - A snippet bound to its document text; the record type formulas see

use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::value::Value;

/// Half-open `[start, end)` character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "[usize; 2]")]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<[usize; 2]> for Span {
    type Error = String;

    fn try_from([start, end]: [usize; 2]) -> Result<Self, Self::Error> {
        if start > end {
            return Err(format!("span start {} is after end {}", start, end));
        }
        Ok(Span { start, end })
    }
}

/// A typed record derived from a span of the source document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snippet {
    #[serde(rename = "type")]
    pub kind: String,
    pub span: Span,
    /// Type-specific extra fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Snippet {
    pub fn new(kind: impl Into<String>, span: Span) -> Snippet {
        Snippet {
            kind: kind.into(),
            span,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: serde_json::Value) -> Snippet {
        self.fields.insert(name.into(), value);
        self
    }
}

/// Parse a JSON array of snippet objects.
pub fn parse_snippets(json: &str) -> Result<Vec<Snippet>, serde_json::Error> {
    serde_json::from_str(json)
}

/// A snippet bound to its document: the value formulas operate on.
///
/// Cloning is cheap; the snippet itself is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    snippet: Arc<Snippet>,
    text: String,
    line: Option<usize>,
}

impl Highlight {
    pub(crate) fn new(snippet: Arc<Snippet>, text: String, line: Option<usize>) -> Highlight {
        Highlight {
            snippet,
            text,
            line,
        }
    }

    pub fn snippet(&self) -> &Snippet {
        &self.snippet
    }

    pub fn kind(&self) -> &str {
        &self.snippet.kind
    }

    pub fn span(&self) -> Span {
        self.snippet.span
    }

    /// Display text: the document characters covered by the span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line the span lies on, if it does not cross a newline.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn on_same_line(&self, other: &Highlight) -> bool {
        self.line.is_some() && self.line == other.line
    }

    /// Property lookup as seen from formulas and sheet columns.
    ///
    /// Built-in properties shadow extra fields of the same name.
    pub fn field(&self, name: &str) -> Option<Value> {
        let span = self.span();
        match name {
            "type" => Some(Value::Text(self.kind().to_string())),
            "span" => Some(Value::List(vec![
                Value::Int(span.start as i64),
                Value::Int(span.end as i64),
            ])),
            "start" => Some(Value::Int(span.start as i64)),
            "end" => Some(Value::Int(span.end as i64)),
            "text" => Some(Value::Text(self.text.clone())),
            "line" => Some(self.line.map_or(Value::Unit, |l| Value::Int(l as i64))),
            _ => self.snippet.fields.get(name).map(Value::from_json),
        }
    }
}
