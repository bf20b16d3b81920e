//! Row ordering for the table view.
//!
//! Values are compared by date, number or text depending on the column. Rows
//! with no value in the sort column always go last, whatever the direction.
//! Ties between highlight rows fall back to document order.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

use snipsheet_engine::engine::{Value, format_value};
use tracing::debug;

use super::ResultRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMethod {
    Date,
    Numeric,
    Lexicographic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Which column the table is sorted by, and which way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        SortSpec {
            column: column.into(),
            direction,
        }
    }
}

/// Leading float literal, the way a lenient `parseFloat` reads it.
fn float_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
            .expect("float prefix regex must compile")
    })
}

/// Parse the leading number of `text`; NaN when there is none.
pub fn parse_float(text: &str) -> f64 {
    float_prefix_re()
        .find(text)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Parse a date or date-time as milliseconds since the epoch; NaN when unparseable.
pub fn parse_date(text: &str) -> f64 {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.timestamp_millis() as f64;
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return dt.and_utc().timestamp_millis() as f64;
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt)
            && let Some(dt) = date.and_hms_opt(0, 0, 0)
        {
            return dt.and_utc().timestamp_millis() as f64;
        }
    }
    f64::NAN
}

/// Value used for comparison: highlights compare by their text; `()` is absent.
fn comparison_value(value: Value) -> Option<Value> {
    match value {
        Value::Unit => None,
        Value::Highlight(h) => Some(Value::Text(h.text().to_string())),
        other => Some(other),
    }
}

fn looks_numeric(value: &Value) -> bool {
    match value {
        Value::Int(_) | Value::Float(_) => true,
        Value::Text(s) => float_prefix_re().is_match(s),
        Value::Highlight(h) => float_prefix_re().is_match(h.text()),
        _ => false,
    }
}

fn as_number(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Float(n) => *n,
        Value::Bool(_) | Value::Unit | Value::Error(_) => f64::NAN,
        other => parse_float(&format_value(other)),
    }
}

fn as_timestamp(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Float(n) => *n,
        Value::Text(s) => parse_date(s),
        _ => f64::NAN,
    }
}

/// Numeric ordering. NaN is incomparable to numbers: it ranks after every
/// number in both directions, and all NaNs tie.
fn order_numbers(a: f64, b: f64, direction: SortDirection) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(a.total_cmp(&b)),
    }
}

/// Case-insensitive first, then exact, as a stand-in for locale collation.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_values(
    a: &Value,
    b: &Value,
    method: SortMethod,
    direction: SortDirection,
) -> Ordering {
    match method {
        SortMethod::Date => order_numbers(as_timestamp(a), as_timestamp(b), direction),
        SortMethod::Numeric => order_numbers(as_number(a), as_number(b), direction),
        SortMethod::Lexicographic => {
            direction.apply(compare_text(&format_value(a), &format_value(b)))
        }
    }
}

/// Pick the comparison for a column: `date` columns by date, columns whose
/// first value looks like a number numerically, everything else as text.
pub fn choose_sort_method(rows: &[ResultRow], column: &str) -> SortMethod {
    if column == "date" {
        return SortMethod::Date;
    }
    match rows.first().and_then(|row| row.cell(column)) {
        Some(value) if looks_numeric(&value) => SortMethod::Numeric,
        _ => SortMethod::Lexicographic,
    }
}

/// Compare two rows by `column`.
///
/// Absent values sort last in both directions, after unparseable dates and
/// numbers. `direction` flips only the value comparison; the span tie-break
/// is always ascending, and highlight rows precede other rows on a tie.
pub fn compare(
    a: &ResultRow,
    b: &ResultRow,
    column: &str,
    method: SortMethod,
    direction: SortDirection,
) -> Ordering {
    let left = a.cell(column).and_then(comparison_value);
    let right = b.cell(column).and_then(comparison_value);

    let primary = match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => compare_values(&x, &y, method, direction),
    };

    primary.then_with(|| match (a.highlight(), b.highlight()) {
        (Some(x), Some(y)) => x.span().start.cmp(&y.span().start),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Stable sort of `rows` by `spec`, choosing the method from the rows themselves.
pub fn sort_rows(rows: &mut [ResultRow], spec: &SortSpec) {
    let method = choose_sort_method(rows, &spec.column);
    debug!(
        column = %spec.column,
        ?method,
        direction = ?spec.direction,
        rows = rows.len(),
        "sorting rows"
    );
    rows.sort_by(|a, b| compare(a, b, &spec.column, method, spec.direction));
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipsheet_engine::engine::{Document, Snippet, Span};

    fn text_rows(values: &[Option<&str>]) -> Vec<ResultRow> {
        values
            .iter()
            .map(|v| ResultRow::new("n", v.map_or(Value::Unit, |s| Value::Text(s.to_string()))))
            .collect()
    }

    fn column(rows: &[ResultRow], name: &str) -> Vec<String> {
        rows.iter()
            .map(|r| r.cell(name).map(|v| format_value(&v)).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_undefined_sorts_last_ascending() {
        let mut rows = text_rows(&[Some("b"), Some("a"), None]);
        sort_rows(&mut rows, &SortSpec::new("n", SortDirection::Ascending));
        assert_eq!(column(&rows, "n"), vec!["a", "b", ""]);
        assert!(rows[2].cell("n").is_some_and(|v| v.is_unit()));
    }

    #[test]
    fn test_undefined_sorts_last_descending() {
        let mut rows = text_rows(&[Some("a"), None, Some("b")]);
        sort_rows(&mut rows, &SortSpec::new("n", SortDirection::Descending));
        assert_eq!(column(&rows, "n"), vec!["b", "a", ""]);
    }

    #[test]
    fn test_compare_undefined() {
        let rows = text_rows(&[None, None, Some("x")]);
        let m = SortMethod::Lexicographic;
        for dir in [SortDirection::Ascending, SortDirection::Descending] {
            assert_eq!(compare(&rows[0], &rows[1], "n", m, dir), Ordering::Equal);
            assert_eq!(compare(&rows[2], &rows[0], "n", m, dir), Ordering::Less);
            assert_eq!(compare(&rows[0], &rows[2], "n", m, dir), Ordering::Greater);
        }
    }

    #[test]
    fn test_missing_column_counts_as_undefined() {
        let rows = vec![ResultRow::new("other", Value::Int(1)), ResultRow::new("n", Value::Int(1))];
        let ord = compare(&rows[0], &rows[1], "n", SortMethod::Numeric, SortDirection::Ascending);
        assert_eq!(ord, Ordering::Greater);
    }

    #[test]
    fn test_choose_sort_method() {
        let numeric = vec![ResultRow::new("n", Value::Text("12 kcal".into()))];
        assert_eq!(choose_sort_method(&numeric, "n"), SortMethod::Numeric);
        assert_eq!(choose_sort_method(&numeric, "date"), SortMethod::Date);

        let text = text_rows(&[Some("apple"), Some("3")]);
        assert_eq!(choose_sort_method(&text, "n"), SortMethod::Lexicographic);
        assert_eq!(choose_sort_method(&[], "n"), SortMethod::Lexicographic);
    }

    #[test]
    fn test_numeric_sort() {
        let mut rows = text_rows(&[Some("10"), Some("9"), Some("100")]);
        sort_rows(&mut rows, &SortSpec::new("n", SortDirection::Ascending));
        assert_eq!(column(&rows, "n"), vec!["9", "10", "100"]);

        let mut ints: Vec<ResultRow> = [3, 1, 2]
            .into_iter()
            .map(|n| ResultRow::new("n", Value::Int(n)))
            .collect();
        sort_rows(&mut ints, &SortSpec::new("n", SortDirection::Descending));
        assert_eq!(column(&ints, "n"), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_numeric_nan_ranks_after_numbers() {
        let rows = text_rows(&[Some("abc"), Some("5"), Some("n/a")]);
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let m = SortMethod::Numeric;
            assert_eq!(compare(&rows[0], &rows[1], "n", m, direction), Ordering::Greater);
            assert_eq!(compare(&rows[1], &rows[0], "n", m, direction), Ordering::Less);
            assert_eq!(compare(&rows[0], &rows[2], "n", m, direction), Ordering::Equal);
        }
    }

    #[test]
    fn test_sort_mixed_numbers_and_unparseable() {
        let values: Vec<String> = (0..64)
            .map(|i| {
                if i % 3 == 0 {
                    "n/a".to_string()
                } else {
                    ((i * 37) % 101).to_string()
                }
            })
            .collect();
        let mut cells: Vec<Option<&str>> = vec![Some("7")];
        cells.extend(values.iter().map(|v| Some(v.as_str())));
        cells.push(None);

        let mut expected: Vec<i64> = cells
            .iter()
            .flatten()
            .filter_map(|v| v.parse().ok())
            .collect();
        expected.sort();
        let nan_count = cells.iter().flatten().filter(|v| **v == "n/a").count();

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let mut rows = text_rows(&cells);
            sort_rows(&mut rows, &SortSpec::new("n", direction));
            let shown = column(&rows, "n");

            let numbers: Vec<i64> = shown.iter().filter_map(|v| v.parse().ok()).collect();
            let mut want = expected.clone();
            if direction == SortDirection::Descending {
                want.reverse();
            }
            assert_eq!(numbers, want);

            let tail = &shown[expected.len()..];
            assert_eq!(tail.len(), nan_count + 1);
            assert!(tail[..nan_count].iter().all(|v| v == "n/a"));
            assert_eq!(tail[nan_count], "");
        }
    }

    #[test]
    fn test_unparseable_dates_rank_after_dates() {
        let mut rows: Vec<ResultRow> = ["someday", "2024-03-01", "later", "2023-12-25"]
            .into_iter()
            .map(|d| ResultRow::new("date", Value::Text(d.into())))
            .collect();
        sort_rows(&mut rows, &SortSpec::new("date", SortDirection::Descending));
        assert_eq!(
            column(&rows, "date"),
            vec!["2024-03-01", "2023-12-25", "someday", "later"]
        );
    }

    #[test]
    fn test_date_sort() {
        let mut rows: Vec<ResultRow> = ["2024-03-01", "2023-12-25", "2024-01-15T08:00:00Z"]
            .into_iter()
            .map(|d| ResultRow::new("date", Value::Text(d.into())))
            .collect();
        sort_rows(&mut rows, &SortSpec::new("date", SortDirection::Ascending));
        assert_eq!(
            column(&rows, "date"),
            vec!["2023-12-25", "2024-01-15T08:00:00Z", "2024-03-01"]
        );
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_float("  3.5kg"), 3.5);
        assert_eq!(parse_float("-2e3"), -2000.0);
        assert!(parse_float("kg").is_nan());
        assert_eq!(parse_date("1970-01-02"), 86_400_000.0);
        assert_eq!(parse_date("January 2, 1970"), 86_400_000.0);
        assert!(parse_date("someday").is_nan());
    }

    #[test]
    fn test_lexicographic_ignores_case_first() {
        let mut rows = text_rows(&[Some("banana"), Some("Apple"), Some("apple"), Some("Cherry")]);
        sort_rows(&mut rows, &SortSpec::new("n", SortDirection::Ascending));
        assert_eq!(column(&rows, "n"), vec!["Apple", "apple", "banana", "Cherry"]);
    }

    #[test]
    fn test_ties_broken_by_span_regardless_of_direction() {
        let doc = Document::new("tea tea tea");
        let snippets = [
            Snippet::new("d", Span::new(8, 11)),
            Snippet::new("d", Span::new(0, 3)),
            Snippet::new("d", Span::new(4, 7)),
        ];
        let rows: Vec<ResultRow> = snippets
            .iter()
            .map(|s| ResultRow::new("drink", Value::Highlight(doc.highlight(s))))
            .collect();

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let mut sorted = rows.clone();
            sort_rows(&mut sorted, &SortSpec::new("drink", direction));
            let starts: Vec<usize> = sorted
                .iter()
                .filter_map(|r| r.highlight().map(|h| h.span().start))
                .collect();
            assert_eq!(starts, vec![0, 4, 8]);
        }
    }

    #[test]
    fn test_ties_without_highlights_stay_equal() {
        let lower = ResultRow::new("n", Value::Text("same".into()));
        let upper = ResultRow::new("n", Value::Text("Same".into()));
        let ord = compare(&lower, &upper, "n", SortMethod::Lexicographic, SortDirection::Ascending);
        assert_eq!(ord, Ordering::Greater);

        let ord = compare(
            &lower,
            &lower,
            "n",
            SortMethod::Lexicographic,
            SortDirection::Descending,
        );
        assert_eq!(ord, Ordering::Equal);

        let a = ResultRow::new("n", Value::Int(1));
        let b = ResultRow::new("n", Value::Float(1.0));
        assert_eq!(
            compare(&a, &b, "n", SortMethod::Numeric, SortDirection::Ascending),
            Ordering::Equal
        );
    }
}
