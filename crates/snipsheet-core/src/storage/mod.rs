//! Loading inputs and exporting sheets.

mod csv;
mod io;
mod md;

pub use csv::{to_csv, write_csv};
pub use io::{load_document, load_sheets, load_snippets};
pub use md::{to_markdown, write_markdown};
