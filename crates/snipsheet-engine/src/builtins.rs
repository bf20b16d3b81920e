//! Built-in formula functions (Rust) and their metadata.
//!
//! Conventions:
//! - Formula-facing built-in names are ALL CAPS (e.g. `FILTER`, `FIRST`).
//! - These are the only functions a formula can call; the engine loads no
//!   standard packages. If you add a built-in, list it in `BUILTINS` and
//!   register its implementation in `register_builtins`.

use crate::engine::Highlight;
use rhai::{Dynamic, Engine, EvalAltResult, FnPtr, ImmutableString, NativeCallContext};

use std::sync::Arc;

/// Reference entry for one formula function (autocompletion, help text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
    pub name: &'static str,
    pub signature: &'static str,
    pub description: &'static str,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "VALUES_OF_TYPE",
        signature: "VALUES_OF_TYPE(type: string) -> list",
        description: "All snippets whose type equals `type`, in document order",
    },
    Builtin {
        name: "ON_SAME_LINE",
        signature: "ON_SAME_LINE(a: highlight, b: highlight) -> bool",
        description: "True when both snippets sit on one line each and it is the same line; \
                      with one argument, returns a predicate with `a` bound",
    },
    Builtin {
        name: "FILTER",
        signature: "FILTER(list: list, predicate: fn) -> list",
        description: "Items of `list` for which `predicate(item)` is truthy; \
                      a non-function predicate keeps every item",
    },
    Builtin {
        name: "FIRST",
        signature: "FIRST(list: list) -> any",
        description: "First item of `list`, or nothing when empty",
    },
    Builtin {
        name: "SECOND",
        signature: "SECOND(list: list) -> any",
        description: "Second item of `list`, or nothing when absent",
    },
];

pub fn builtin(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// JavaScript-style truthiness for predicate results.
pub(crate) fn is_truthy(value: &Dynamic) -> bool {
    if value.is_unit() {
        false
    } else if let Ok(b) = value.as_bool() {
        b
    } else if let Ok(n) = value.as_int() {
        n != 0
    } else if let Ok(n) = value.as_float() {
        n != 0.0 && !n.is_nan()
    } else if value.is_string() {
        value.clone().into_string().is_ok_and(|s| !s.is_empty())
    } else {
        true
    }
}

/// Bind the first argument of a registered function, yielding a callable
/// that takes the remaining arguments.
fn bind_first(fn_name: &str, arg: Dynamic) -> Result<FnPtr, Box<EvalAltResult>> {
    let mut fn_ptr = FnPtr::new(fn_name)?;
    fn_ptr.add_curry(arg);
    Ok(fn_ptr)
}

fn nth(list: &rhai::Array, index: usize) -> Dynamic {
    list.get(index).cloned().unwrap_or(Dynamic::UNIT)
}

/// Register the highlight type and its properties.
fn register_highlight_type(engine: &mut Engine) {
    engine.register_type_with_name::<Highlight>("Highlight");

    engine.register_get("type", |h: &mut Highlight| -> String { h.kind().to_string() });
    engine.register_get("text", |h: &mut Highlight| -> String { h.text().to_string() });
    engine.register_get("start", |h: &mut Highlight| -> i64 { h.span().start as i64 });
    engine.register_get("end", |h: &mut Highlight| -> i64 { h.span().end as i64 });
    engine.register_get("span", |h: &mut Highlight| -> rhai::Array {
        let span = h.span();
        vec![
            Dynamic::from(span.start as i64),
            Dynamic::from(span.end as i64),
        ]
    });
    engine.register_get("line", |h: &mut Highlight| -> Dynamic {
        h.line().map_or(Dynamic::UNIT, |l| Dynamic::from(l as i64))
    });

    // h["field"]: built-in properties and type-specific extra fields.
    // Missing fields are `()`, not an error.
    engine.register_indexer_get(|h: &mut Highlight, name: ImmutableString| -> Dynamic {
        h.field(name.as_str())
            .map_or(Dynamic::UNIT, |value| value.into_dynamic())
    });
}

/// Register all built-in functions into the Rhai engine.
pub fn register_builtins(engine: &mut Engine, highlights: Arc<Vec<Highlight>>) {
    register_highlight_type(engine);

    // VALUES_OF_TYPE(type): highlights of one type, document order

    let store = highlights.clone();
    engine.register_fn("VALUES_OF_TYPE", move |kind: &str| -> rhai::Array {
        store
            .iter()
            .filter(|h| h.kind() == kind)
            .cloned()
            .map(Dynamic::from)
            .collect()
    });

    // ON_SAME_LINE(a, b): both spans on one line, and the same one

    engine.register_fn("ON_SAME_LINE", |a: Highlight, b: Highlight| -> bool {
        a.on_same_line(&b)
    });

    // ON_SAME_LINE(a): predicate with `a` bound, for FILTER
    engine.register_fn(
        "ON_SAME_LINE",
        |a: Highlight| -> Result<FnPtr, Box<EvalAltResult>> {
            bind_first("ON_SAME_LINE", Dynamic::from(a))
        },
    );

    // FILTER(list, predicate): keep items where predicate(item) is truthy.
    // A non-callable predicate keeps everything.
    engine.register_fn(
        "FILTER",
        |ctx: NativeCallContext,
         list: rhai::Array,
         predicate: Dynamic|
         -> Result<rhai::Array, Box<EvalAltResult>> {
            let Some(predicate) = predicate.try_cast::<FnPtr>() else {
                return Ok(list);
            };
            let mut kept = rhai::Array::new();
            for item in list {
                let verdict: Dynamic = predicate.call_within_context(&ctx, (item.clone(),))?;
                if is_truthy(&verdict) {
                    kept.push(item);
                }
            }
            Ok(kept)
        },
    );

    // FIRST(list) / SECOND(list): `()` when absent

    engine.register_fn("FIRST", |list: rhai::Array| -> Dynamic { nth(&list, 0) });
    engine.register_fn("SECOND", |list: rhai::Array| -> Dynamic { nth(&list, 1) });
}
