//! Sheet model: configuration, column evaluation, ordering and view state (UI-agnostic).

mod columns;
mod config;
mod session;
mod sort;
mod view;

pub use columns::{ResultRow, evaluate_columns, evaluate_columns_with};
pub use config::{FormulaColumn, SheetConfig, SheetStore};
pub use session::{Sessions, SheetSession};
pub use sort::{
    SortDirection, SortMethod, SortSpec, choose_sort_method, compare, parse_date, parse_float,
    sort_rows,
};
pub use view::SheetView;
