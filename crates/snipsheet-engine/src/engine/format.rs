use super::Value;

/// Marker shown in place of a value whose formula failed.
pub const ERROR_MARKER: &str = "#ERR!";

/// Format a value for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Unit => String::new(),
        Value::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => format_number(*n),
        Value::Text(s) => s.clone(),
        Value::List(items) => items.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Record(map) => {
            let fields = map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, format_value(v)))
                .collect::<Vec<_>>();
            format!("{{{}}}", fields.join(", "))
        }
        Value::Highlight(h) => h.text().to_string(),
        Value::Error(_) => ERROR_MARKER.to_string(),
    }
}

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        format!("{:.2}", n)
    }
}
