//! Formula engine API.
//!
//! This module provides the computation engine behind a sheet:
//!
//! - [`Document`] - Source text with a line index
//! - [`Snippet`], [`Span`], [`Highlight`] - Records extracted from a document
//! - [`Value`] - Tagged result of evaluating a formula
//! - [`FormulaEngine`], [`evaluate`] - Evaluate formulas against a snippet set
//! - [`BUILTINS`] - The functions a formula may call
//! - [`format_value`] - Format values for display

mod document;
mod eval;
mod format;
mod snippet;
mod value;

pub use crate::builtins::{BUILTINS, Builtin, builtin};
pub use document::Document;
pub use eval::{
    EvalLimits, FormulaEngine, FormulaError, create_engine, evaluate, try_evaluate,
};
pub use format::{ERROR_MARKER, format_number, format_value};
pub use snippet::{Highlight, Snippet, Span, parse_snippets};
pub use value::Value;

pub use rhai::Dynamic;
