//! snipsheet-core - UI-agnostic sheet model, sorting and export.

pub mod error;
pub mod sheet;
pub mod storage;

pub use error::{Result, SnipsheetError};
pub use sheet::{
    FormulaColumn, ResultRow, SheetConfig, SheetSession, SheetStore, SheetView, SortDirection,
    SortMethod, SortSpec, evaluate_columns,
};

pub use snipsheet_engine::engine::{Document, Snippet, Span, Value};
