//! Source document text and its line index.

use std::sync::Arc;

use super::snippet::{Highlight, Snippet, Span};

/// The text a snippet set was extracted from.
///
/// Offsets are character offsets (not bytes), matching how spans are produced
/// upstream.
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    /// Character offset of the first character of each line. Always starts with 0.
    line_starts: Vec<usize>,
    char_len: usize,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        let mut char_len = 0;
        for (idx, c) in text.chars().enumerate() {
            if c == '\n' {
                line_starts.push(idx + 1);
            }
            char_len = idx + 1;
        }
        Document {
            text,
            line_starts,
            char_len,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line (0-indexed) containing the character offset.
    ///
    /// A newline belongs to the line it terminates. Offsets past the end of
    /// the text resolve to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset) - 1
    }

    /// Line the span lies on, or `None` when its endpoints fall on different lines.
    pub fn line_of_span(&self, span: Span) -> Option<usize> {
        let line = self.line_of(span.start);
        (line == self.line_of(span.end)).then_some(line)
    }

    /// Text covered by the span. Out-of-range parts are dropped.
    pub fn slice(&self, span: Span) -> String {
        self.text.chars().skip(span.start).take(span.len()).collect()
    }

    /// Bind a snippet to this document.
    pub fn highlight(&self, snippet: &Snippet) -> Highlight {
        Highlight::new(
            Arc::new(snippet.clone()),
            self.slice(snippet.span),
            self.line_of_span(snippet.span),
        )
    }

    /// Bind every snippet to this document, preserving order.
    pub fn highlights(&self, snippets: &[Snippet]) -> Vec<Highlight> {
        snippets.iter().map(|s| self.highlight(s)).collect()
    }
}
