//! Column evaluation: formula columns -> result rows.

use std::collections::BTreeMap;

use snipsheet_engine::engine::{Document, FormulaEngine, Highlight, Snippet, Value};
use tracing::debug;

use super::FormulaColumn;

/// One row of sheet output.
///
/// Rows are produced fresh on every evaluation pass and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    primary: String,
    data: BTreeMap<String, Value>,
}

impl ResultRow {
    pub fn new(column: impl Into<String>, value: Value) -> Self {
        let primary = column.into();
        let data = BTreeMap::from([(primary.clone(), value)]);
        ResultRow { primary, data }
    }

    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.data
    }

    /// Name of the column that produced this row.
    pub fn primary_column(&self) -> &str {
        &self.primary
    }

    pub fn primary(&self) -> Option<&Value> {
        self.data.get(&self.primary)
    }

    /// The highlight this row was produced from, if any.
    pub fn highlight(&self) -> Option<&Highlight> {
        self.primary().and_then(Value::as_highlight)
    }

    /// Value shown in `column` for this row.
    ///
    /// Only the producing column is evaluated; any other column reads the
    /// field of the same name from the producing value.
    pub fn cell(&self, column: &str) -> Option<Value> {
        if let Some(value) = self.data.get(column) {
            return Some(value.clone());
        }
        self.primary().and_then(|v| v.field(column))
    }
}

/// Evaluate a sheet's columns against a snippet set.
///
/// Only the first column is evaluated into rows: a list yields one row per
/// item, anything else a single row. `()` and empty lists yield no rows.
pub fn evaluate_columns(
    columns: &[FormulaColumn],
    snippets: &[Snippet],
    document: &Document,
) -> Vec<ResultRow> {
    if columns.is_empty() {
        return Vec::new();
    }
    let engine = FormulaEngine::new(document, snippets);
    evaluate_columns_with(&engine, columns)
}

/// Same as [`evaluate_columns`], reusing an engine already bound to the snippets.
pub fn evaluate_columns_with(engine: &FormulaEngine, columns: &[FormulaColumn]) -> Vec<ResultRow> {
    let Some(first) = columns.first() else {
        return Vec::new();
    };
    let value = engine.evaluate(&first.formula);
    if let Value::Error(message) = &value {
        debug!(column = %first.name, error = %message, "column formula failed");
    }
    let rows = rows_from_value(&first.name, value);
    debug!(column = %first.name, rows = rows.len(), "evaluated columns");
    rows
}

fn rows_from_value(column: &str, value: Value) -> Vec<ResultRow> {
    match value {
        Value::Unit => Vec::new(),
        Value::List(items) => items
            .into_iter()
            .map(|item| ResultRow::new(column, item))
            .collect(),
        other => vec![ResultRow::new(column, other)],
    }
}
