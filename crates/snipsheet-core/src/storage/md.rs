//! Markdown export functionality

use crate::error::Result;
use crate::sheet::SheetView;
use std::path::Path;

/// Render a sheet as a markdown document with one table.
pub fn to_markdown(view: &SheetView) -> String {
    let mut out = format!("# {}\n\n", escape_markdown(&view.name));

    if view.columns.is_empty() || view.rows.is_empty() {
        out.push_str("*Empty sheet*\n");
        return out;
    }

    out.push('|');
    for column in &view.columns {
        out.push_str(&format!(" {} |", escape_markdown(&column.name)));
    }
    out.push('\n');

    out.push('|');
    for _ in &view.columns {
        out.push_str("---|");
    }
    out.push('\n');

    for row in &view.rows {
        out.push('|');
        for cell in view.display_row(row) {
            out.push_str(&format!(" {} |", escape_markdown(&cell)));
        }
        out.push('\n');
    }
    out
}

/// Write the sheet to a markdown file
pub fn write_markdown(path: &Path, view: &SheetView) -> Result<()> {
    std::fs::write(path, to_markdown(view))?;
    tracing::debug!(path = %path.display(), rows = view.rows.len(), "wrote markdown");
    Ok(())
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
