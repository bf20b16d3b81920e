//! Rhai engine creation and formula evaluation.
//!
//! Creates a Rhai engine whose only callable names are the formula built-ins
//! (VALUES_OF_TYPE, ON_SAME_LINE, FILTER, FIRST, SECOND) bound to one
//! document's snippets, and evaluates formula source against it.

use rhai::{Dynamic, Engine};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::{Document, Highlight, Snippet, Value};

/// Errors a formula can produce.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Syntax error: {0}")]
    Parse(String),

    #[error("Evaluation error: {0}")]
    Eval(String),
}

/// Name prefix Rhai gives the functions closures compile to.
const ANONYMOUS_FN_PREFIX: &str = "anon$";

/// Bounds applied to every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalLimits {
    pub max_operations: u64,
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_operations: 1_000_000,
            max_call_levels: 32,
            max_expr_depth: 64,
        }
    }
}

/// Create a Rhai engine with the formula built-ins registered.
///
/// The engine has no standard packages and runs with strict variables, so a
/// free identifier that is not a closure parameter fails to compile and a call
/// to anything but a built-in fails to evaluate.
pub fn create_engine(highlights: Arc<Vec<Highlight>>, limits: EvalLimits) -> Engine {
    let mut engine = Engine::new_raw();
    engine.set_strict_variables(true);
    engine.set_allow_looping(false);
    engine.set_max_operations(limits.max_operations);
    engine.set_max_call_levels(limits.max_call_levels);
    engine.set_max_expr_depths(limits.max_expr_depth, limits.max_expr_depth);
    crate::builtins::register_builtins(&mut engine, highlights);
    engine
}

/// A formula engine bound to one document and its snippet set.
///
/// Nothing is cached between calls: each evaluation compiles and runs the
/// formula source again.
pub struct FormulaEngine {
    engine: Engine,
    snippet_count: usize,
}

impl FormulaEngine {
    pub fn new(document: &Document, snippets: &[Snippet]) -> Self {
        Self::with_limits(document, snippets, EvalLimits::default())
    }

    pub fn with_limits(document: &Document, snippets: &[Snippet], limits: EvalLimits) -> Self {
        let highlights = Arc::new(document.highlights(snippets));
        FormulaEngine {
            engine: create_engine(highlights, limits),
            snippet_count: snippets.len(),
        }
    }

    /// Evaluate a formula, reporting failures as [`FormulaError`].
    pub fn try_evaluate(&self, formula: &str) -> Result<Value, FormulaError> {
        debug!(formula, snippets = self.snippet_count, "evaluating formula");
        let ast = self
            .engine
            .compile(formula)
            .map_err(|e| FormulaError::Parse(e.to_string()))?;
        // Closures compile to anonymous functions; named `fn` definitions are
        // not part of the formula language.
        if let Some(def) = ast
            .iter_functions()
            .find(|f| !f.name.starts_with(ANONYMOUS_FN_PREFIX))
        {
            return Err(FormulaError::Parse(format!(
                "function definitions are not allowed in formulas: {}",
                def.name
            )));
        }
        let result = self
            .engine
            .eval_ast::<Dynamic>(&ast)
            .map_err(|e| FormulaError::Eval(e.to_string()))?;
        Ok(Value::from_dynamic(result))
    }

    /// Evaluate a formula; failures become [`Value::Error`].
    pub fn evaluate(&self, formula: &str) -> Value {
        match self.try_evaluate(formula) {
            Ok(value) => value,
            Err(e) => {
                debug!(formula, error = %e, "formula failed");
                Value::Error(e.to_string())
            }
        }
    }
}

/// Evaluate one formula against a snippet set.
pub fn evaluate(formula: &str, snippets: &[Snippet], document: &Document) -> Value {
    FormulaEngine::new(document, snippets).evaluate(formula)
}

/// Evaluate one formula against a snippet set, keeping the error.
pub fn try_evaluate(
    formula: &str,
    snippets: &[Snippet],
    document: &Document,
) -> Result<Value, FormulaError> {
    FormulaEngine::new(document, snippets).try_evaluate(formula)
}
