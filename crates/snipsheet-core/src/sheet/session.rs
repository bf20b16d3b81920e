//! Per-document view state owned by the host.
//!
//! Evaluation never reads this; the host passes it in when it renders.

use std::collections::{HashMap, HashSet};

use snipsheet_engine::engine::Span;

use super::ResultRow;
use super::sort::{SortDirection, SortSpec, sort_rows};

/// Transient UI state for one sheet of one document.
#[derive(Debug, Clone, Default)]
pub struct SheetSession {
    pub sort: Option<SortSpec>,
    pub expanded: bool,
    hovered: HashSet<Span>,
}

impl SheetSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header click: sort ascending by a new column, or flip the current one.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = match self.sort.take() {
            Some(spec) if spec.column == column => {
                Some(SortSpec::new(column, spec.direction.reversed()))
            }
            _ => Some(SortSpec::new(column, SortDirection::Ascending)),
        };
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Order rows by the current sort, if any.
    pub fn apply_sort(&self, rows: &mut [ResultRow]) {
        if let Some(spec) = &self.sort {
            sort_rows(rows, spec);
        }
    }

    /// Mark every highlight referenced by the row as hovered.
    pub fn hover_row(&mut self, row: &ResultRow) {
        self.hovered = row
            .data()
            .values()
            .flat_map(|v| v.highlights())
            .map(|h| h.span())
            .collect();
    }

    pub fn clear_hover(&mut self) {
        self.hovered.clear();
    }

    pub fn is_span_hovered(&self, span: Span) -> bool {
        self.hovered.contains(&span)
    }

    /// Rows are matched by the spans they reference, since they carry no
    /// identity across evaluation passes.
    pub fn is_hovered(&self, row: &ResultRow) -> bool {
        row.data()
            .values()
            .flat_map(|v| v.highlights())
            .any(|h| self.hovered.contains(&h.span()))
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }
}

/// Sessions keyed by document id and sheet name.
#[derive(Debug, Default)]
pub struct Sessions {
    sessions: HashMap<(String, String), SheetSession>,
}

impl Sessions {
    pub fn get(&self, document_id: &str, sheet: &str) -> Option<&SheetSession> {
        self.sessions
            .get(&(document_id.to_string(), sheet.to_string()))
    }

    /// Session for a sheet, created on first use.
    pub fn entry(&mut self, document_id: &str, sheet: &str) -> &mut SheetSession {
        self.sessions
            .entry((document_id.to_string(), sheet.to_string()))
            .or_default()
    }

    /// Drop every session belonging to a closed document.
    pub fn close_document(&mut self, document_id: &str) {
        self.sessions.retain(|(doc, _), _| doc != document_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
