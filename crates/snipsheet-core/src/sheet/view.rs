//! Table view: evaluated, ordered rows of one sheet, and their text rendering.

use snipsheet_engine::engine::{Document, Snippet, format_value};

use super::sort::{SortDirection, SortSpec};
use super::{FormulaColumn, ResultRow, SheetConfig, SheetSession, SheetStore, evaluate_columns};

/// A sheet ready to display: visible columns and rows in display order.
#[derive(Debug, Clone)]
pub struct SheetView {
    pub name: String,
    pub columns: Vec<FormulaColumn>,
    pub rows: Vec<ResultRow>,
    pub sort: Option<SortSpec>,
}

impl SheetView {
    /// Evaluate a sheet and order its rows by the session's sort.
    pub fn build(
        config: &SheetConfig,
        document: &Document,
        snippets: &[Snippet],
        session: &SheetSession,
    ) -> Self {
        let mut rows = evaluate_columns(&config.properties, snippets, document);
        session.apply_sort(&mut rows);
        SheetView {
            name: config.name.clone(),
            columns: config.visible_columns().cloned().collect(),
            rows,
            sort: session.sort.clone(),
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Display strings for one row, in column order. Absent cells are empty.
    pub fn display_row(&self, row: &ResultRow) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| row.cell(&c.name).map(|v| format_value(&v)).unwrap_or_default())
            .collect()
    }

    fn header(&self, column: &FormulaColumn) -> String {
        match &self.sort {
            Some(spec) if spec.column == column.name => {
                let arrow = match spec.direction {
                    SortDirection::Ascending => '▲',
                    SortDirection::Descending => '▼',
                };
                format!("{} {}", column.name, arrow)
            }
            _ => column.name.clone(),
        }
    }

    /// Render as an aligned plain-text table.
    pub fn render_table(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }
        let headers: Vec<String> = self.columns.iter().map(|c| self.header(c)).collect();
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                self.display_row(r)
                    .into_iter()
                    .map(|cell| cell.replace('\n', " "))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');
        for row in &body {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

impl SheetStore {
    /// Build the view for a named sheet. Unknown names render nothing.
    pub fn view(
        &self,
        name: &str,
        document: &Document,
        snippets: &[Snippet],
        session: &SheetSession,
    ) -> Option<SheetView> {
        let config = self.get(name)?;
        Some(SheetView::build(config, document, snippets, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipsheet_engine::engine::Span;

    fn fixture() -> (Document, Vec<Snippet>, SheetConfig) {
        let doc = Document::new("salad 350\npasta 700");
        let snippets = vec![
            Snippet::new("food", Span::new(0, 5)).with_field("meal", serde_json::json!("lunch")),
            Snippet::new("food", Span::new(10, 15)).with_field("meal", serde_json::json!("dinner")),
        ];
        let config = SheetConfig::new(
            "foods",
            vec![
                FormulaColumn::new("food", r#"VALUES_OF_TYPE("food")"#),
                FormulaColumn::new("meal", ""),
                FormulaColumn::new("type", "").hidden(),
            ],
        );
        (doc, snippets, config)
    }

    #[test]
    fn test_build_skips_hidden_columns() {
        let (doc, snippets, config) = fixture();
        let view = SheetView::build(&config, &doc, &snippets, &SheetSession::new());
        assert_eq!(view.column_names(), vec!["food", "meal"]);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.display_row(&view.rows[1]), vec!["pasta", "dinner"]);
    }

    #[test]
    fn test_render_table() {
        let (doc, snippets, config) = fixture();
        let view = SheetView::build(&config, &doc, &snippets, &SheetSession::new());
        assert_eq!(
            view.render_table(),
            "food  | meal\n------+-------\nsalad | lunch\npasta | dinner\n"
        );
    }

    #[test]
    fn test_render_sorted_table_marks_header() {
        let (doc, snippets, config) = fixture();
        let mut session = SheetSession::new();
        session.toggle_sort("meal");
        let view = SheetView::build(&config, &doc, &snippets, &session);
        assert_eq!(
            view.render_table(),
            "food  | meal ▲\n------+-------\npasta | dinner\nsalad | lunch\n"
        );
    }

    #[test]
    fn test_error_renders_marker() {
        let config = SheetConfig::new("bad", vec![FormulaColumn::new("x", "NOPE()")]);
        let view = SheetView::build(&config, &Document::new(""), &[], &SheetSession::new());
        assert_eq!(view.render_table(), "x\n-----\n#ERR!\n");
    }

    #[test]
    fn test_unknown_sheet_renders_nothing() {
        let (doc, snippets, config) = fixture();
        let store = SheetStore::new(vec![config]);
        let session = SheetSession::new();
        assert!(store.view("drinks", &doc, &snippets, &session).is_none());
        assert!(store.view("foods", &doc, &snippets, &session).is_some());
    }
}
