//! Tagged result values.

use rhai::{Dynamic, FnPtr};
use std::collections::BTreeMap;

use super::snippet::Highlight;

/// The result of evaluating a formula, or one element of it.
///
/// Rendering and sorting dispatch on the tag instead of inspecting runtime types.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value (an out-of-range `FIRST`, a missing field, `()`).
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Record(BTreeMap<String, Value>),
    /// Reference to a snippet in the document.
    Highlight(Highlight),
    /// Evaluation failed; carries the message.
    Error(String),
}

impl Value {
    /// Convert a Rhai result into a tagged value.
    pub fn from_dynamic(value: Dynamic) -> Value {
        if value.is_unit() {
            return Value::Unit;
        }
        if let Ok(b) = value.as_bool() {
            return Value::Bool(b);
        }
        if let Ok(n) = value.as_int() {
            return Value::Int(n);
        }
        if let Ok(n) = value.as_float() {
            return Value::Float(n);
        }
        if let Ok(c) = value.as_char() {
            return Value::Text(c.to_string());
        }
        if value.is_string() {
            if let Ok(s) = value.clone().into_string() {
                return Value::Text(s);
            }
        }
        if value.is::<Highlight>() {
            if let Some(h) = value.clone().try_cast::<Highlight>() {
                return Value::Highlight(h);
            }
        }
        if value.is_array() {
            if let Some(items) = value.clone().try_cast::<rhai::Array>() {
                return Value::List(items.into_iter().map(Value::from_dynamic).collect());
            }
        }
        if value.is_map() {
            if let Some(map) = value.clone().try_cast::<rhai::Map>() {
                return Value::Record(
                    map.into_iter()
                        .map(|(k, v)| (k.to_string(), Value::from_dynamic(v)))
                        .collect(),
                );
            }
        }
        if let Some(f) = value.clone().try_cast::<FnPtr>() {
            return Value::Text(format!("Fn({})", f.fn_name()));
        }
        Value::Text(value.to_string())
    }

    /// Convert back into a Rhai value (used when exposing fields to formulas).
    pub fn into_dynamic(self) -> Dynamic {
        match self {
            Value::Unit => Dynamic::UNIT,
            Value::Bool(b) => Dynamic::from(b),
            Value::Int(n) => Dynamic::from(n),
            Value::Float(n) => Dynamic::from(n),
            Value::Text(s) => Dynamic::from(s),
            Value::List(items) => {
                Dynamic::from_array(items.into_iter().map(Value::into_dynamic).collect())
            }
            Value::Record(map) => Dynamic::from_map(
                map.into_iter()
                    .map(|(k, v)| (k.into(), v.into_dynamic()))
                    .collect(),
            ),
            Value::Highlight(h) => Dynamic::from(h),
            Value::Error(message) => Dynamic::from(message),
        }
    }

    pub fn from_json(value: &serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Unit,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Record(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn as_highlight(&self) -> Option<&Highlight> {
        match self {
            Value::Highlight(h) => Some(h),
            _ => None,
        }
    }

    /// Field exposed by this value: a record key or a highlight property.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Record(map) => map.get(name).cloned(),
            Value::Highlight(h) => h.field(name),
            _ => None,
        }
    }

    /// Every highlight referenced by this value, nested lists and records included.
    pub fn highlights(&self) -> Vec<&Highlight> {
        let mut out = Vec::new();
        self.collect_highlights(&mut out);
        out
    }

    fn collect_highlights<'a>(&'a self, out: &mut Vec<&'a Highlight>) {
        match self {
            Value::Highlight(h) => out.push(h),
            Value::List(items) => items.iter().for_each(|v| v.collect_highlights(out)),
            Value::Record(map) => map.values().for_each(|v| v.collect_highlights(out)),
            _ => {}
        }
    }
}

impl From<Dynamic> for Value {
    fn from(value: Dynamic) -> Self {
        Value::from_dynamic(value)
    }
}
