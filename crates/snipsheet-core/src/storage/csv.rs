//! CSV export

use crate::error::Result;
use crate::sheet::SheetView;
use std::io::Write;
use std::path::Path;

/// Render a sheet as CSV: a header row of column names, then display values.
pub fn to_csv(view: &SheetView) -> String {
    let mut out = String::new();
    let header: Vec<String> = view
        .columns
        .iter()
        .map(|c| escape_csv_field(&c.name))
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in &view.rows {
        let fields: Vec<String> = view
            .display_row(row)
            .iter()
            .map(|value| escape_csv_field(value))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Export a sheet to a CSV file.
pub fn write_csv(path: &Path, view: &SheetView) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(to_csv(view).as_bytes())?;
    tracing::debug!(path = %path.display(), rows = view.rows.len(), "wrote csv");
    Ok(())
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    // Guard against CSV formula injection in spreadsheet apps.
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    let safe_field = if matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field.to_string()
    };

    if safe_field.contains(',')
        || safe_field.contains('"')
        || safe_field.contains('\n')
        || safe_field.contains('\r')
    {
        format!("\"{}\"", safe_field.replace('"', "\"\""))
    } else {
        safe_field
    }
}
