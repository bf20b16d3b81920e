//! Input loading: document text, snippets JSON, sheet config TOML.

use std::path::Path;

use snipsheet_engine::engine::{Document, Snippet, parse_snippets};
use tracing::debug;

use crate::error::{Result, SnipsheetError};
use crate::sheet::SheetStore;

const MAX_INPUT_FILE_BYTES: u64 = 16 * 1_048_576; // 16 MiB
const MAX_SHEETS_FILE_BYTES: u64 = 1_048_576; // 1 MiB

fn read_bounded(path: &Path, max: u64) -> Result<String> {
    let size = std::fs::metadata(path)?.len();
    if size > max {
        return Err(SnipsheetError::TooLarge {
            path: path.display().to_string(),
            size,
            max,
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

pub fn load_document(path: &Path) -> Result<Document> {
    let text = read_bounded(path, MAX_INPUT_FILE_BYTES)?;
    let document = Document::new(text);
    debug!(path = %path.display(), lines = document.line_count(), "loaded document");
    Ok(document)
}

pub fn load_snippets(path: &Path) -> Result<Vec<Snippet>> {
    let content = read_bounded(path, MAX_INPUT_FILE_BYTES)?;
    let snippets = parse_snippets(&content)?;
    debug!(path = %path.display(), count = snippets.len(), "loaded snippets");
    Ok(snippets)
}

pub fn load_sheets(path: &Path) -> Result<SheetStore> {
    let content = read_bounded(path, MAX_SHEETS_FILE_BYTES)?;
    let store = SheetStore::from_toml_str(&content)?;
    debug!(path = %path.display(), sheets = store.names().count(), "loaded sheet config");
    Ok(store)
}
