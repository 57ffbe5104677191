//! Cell values and their display formatting.
//!
//! Backend records are loosely shaped: a field may arrive as a string, a list
//! of strings, a Mongo-style `{$date}` object, a number, or be missing
//! entirely. `FieldValue` captures that variance and `format` maps every case
//! to a non-empty display string, so the table never renders a hole.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Sentinel shown for missing or empty data.
pub const NOT_FOUND: &str = "Not found";

/// Marker prefixing each entry of a multi-value cell.
pub const LIST_MARKER: &str = "\u{2022} ";

/// A single cell value decoded from a raw backend record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
    Date(String),
    Missing,
}

impl FieldValue {
    /// Decodes a raw JSON value. Total: anything unrecognized degrades to a
    /// scalar rendering of the JSON text rather than an error.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(Value::String(s)) => FieldValue::Scalar(s.clone()),
            Some(Value::Number(n)) => FieldValue::Scalar(n.to_string()),
            Some(Value::Bool(b)) => FieldValue::Scalar(b.to_string()),
            Some(Value::Array(items)) => {
                FieldValue::List(items.iter().map(scalar_text).collect())
            }
            Some(obj @ Value::Object(_)) => match extract_date(obj) {
                Some(ts) => FieldValue::Date(ts),
                None => FieldValue::Scalar(obj.to_string()),
            },
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => extract_date(other).unwrap_or_else(|| other.to_string()),
    }
}

/// Pulls the timestamp out of a Mongo extended-JSON `{$date}` wrapper. The
/// payload is either an ISO string or `{$numberLong: "<millis>"}`.
pub fn extract_date(value: &Value) -> Option<String> {
    let date = value.get("$date")?;
    match date {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n
            .as_i64()
            .and_then(millis_to_rfc3339),
        Value::Object(_) => date
            .get("$numberLong")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(millis_to_rfc3339),
        _ => None,
    }
}

fn millis_to_rfc3339(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.to_rfc3339())
}

/// Renders a cell value into its display string. Total over every variant:
/// missing or empty input renders the "Not found" sentinel, unparseable
/// timestamps render "Invalid date", nothing panics.
pub fn format(value: &FieldValue, is_date: bool) -> String {
    match value {
        FieldValue::Missing => NOT_FOUND.to_string(),
        FieldValue::Date(ts) => format_date(ts),
        FieldValue::Scalar(s) => {
            if s.trim().is_empty() {
                NOT_FOUND.to_string()
            } else if is_date {
                format_date(s)
            } else {
                s.clone()
            }
        }
        FieldValue::List(items) => format_entries(items, |item| {
            if is_date {
                format_date(item)
            } else {
                item.to_string()
            }
        }),
    }
}

/// Job-number cells: every surviving entry gets the list marker, whether the
/// raw value was a single scalar or a list. Same empty/"Not found" rule.
pub fn format_job_numbers(value: &FieldValue) -> String {
    match value {
        FieldValue::Missing => NOT_FOUND.to_string(),
        FieldValue::Date(ts) => format!("{LIST_MARKER}{}", format_date(ts)),
        FieldValue::Scalar(s) => format_entries(std::slice::from_ref(s), str::to_string),
        FieldValue::List(items) => format_entries(items, str::to_string),
    }
}

/// Filters blank entries and joins the rest, one marked entry per line.
fn format_entries(items: &[String], render: impl Fn(&str) -> String) -> String {
    let entries: Vec<String> = items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(|item| format!("{LIST_MARKER}{}", render(item)))
        .collect();
    if entries.is_empty() {
        NOT_FOUND.to_string()
    } else {
        entries.join("\n")
    }
}

/// Renders a timestamp as `DD/MM/YYYY HH:MM:SS` in the local zone.
/// Accepts RFC 3339, a few ISO-ish fallbacks, and plain dates; anything that
/// fails to parse renders "Invalid date".
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format("%d/%m/%Y %H:%M:%S").to_string();
        }
    }
    for pattern in ["%Y-%m-%d", "%d/%m/%Y", "%d/%m/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, pattern) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return naive.format("%d/%m/%Y %H:%M:%S").to_string();
            }
        }
    }

    "Invalid date".to_string()
}

/// Day-granularity rendering (`YYYY-MM-DD`) used by the log date filter.
pub fn day_key(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).format("%Y-%m-%d").to_string());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive).format("%Y-%m-%d").to_string());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_empty_render_not_found() {
        assert_eq!(format(&FieldValue::Missing, false), "Not found");
        assert_eq!(format(&FieldValue::Scalar("  ".into()), false), "Not found");
        assert_eq!(format(&FieldValue::List(vec![]), false), "Not found");
        assert_eq!(
            format(&FieldValue::List(vec!["".into(), " ".into()]), false),
            "Not found"
        );
    }

    #[test]
    fn scalar_passes_through() {
        assert_eq!(format(&FieldValue::Scalar("UNDOC".into()), false), "UNDOC");
    }

    #[test]
    fn list_filters_blanks_and_marks_each_entry() {
        let value = FieldValue::List(vec!["x".into(), "".into(), "y".into()]);
        let rendered = format(&value, false);
        assert_eq!(rendered, "\u{2022} x\n\u{2022} y");
        assert_eq!(rendered.matches(LIST_MARKER).count(), 2);
    }

    #[test]
    fn invalid_dates_render_sentinel() {
        assert_eq!(format_date("not-a-date"), "Invalid date");
        assert_eq!(format(&FieldValue::Date("garbage".into()), true), "Invalid date");
    }

    #[test]
    fn rfc3339_dates_render_day_month_year() {
        let rendered = format_date("2026-03-05T00:00:00+00:00");
        assert!(rendered.contains("/03/2026"), "got {rendered}");
        assert_eq!(rendered.len(), "05/03/2026 00:00:00".len());
    }

    #[test]
    fn plain_dates_get_midnight_time() {
        assert_eq!(format_date("2026-03-05"), "05/03/2026 00:00:00");
    }

    #[test]
    fn mongo_date_objects_decode_to_date_values() {
        let value = json!({"$date": "2026-01-02T03:04:05Z"});
        assert_eq!(
            FieldValue::from_json(Some(&value)),
            FieldValue::Date("2026-01-02T03:04:05Z".into())
        );

        let millis = json!({"$date": {"$numberLong": "0"}});
        match FieldValue::from_json(Some(&millis)) {
            FieldValue::Date(ts) => assert!(ts.starts_with("1970-01-01")),
            other => panic!("expected date, got {other:?}"),
        }
    }

    #[test]
    fn job_numbers_mark_single_scalars_too() {
        assert_eq!(
            format_job_numbers(&FieldValue::Scalar("NY12345".into())),
            "\u{2022} NY12345"
        );
        assert_eq!(format_job_numbers(&FieldValue::Missing), "Not found");
        assert_eq!(
            format_job_numbers(&FieldValue::List(vec!["N1".into(), "".into(), "N2".into()])),
            "\u{2022} N1\n\u{2022} N2"
        );
    }

    #[test]
    fn day_key_truncates_to_calendar_day() {
        assert_eq!(
            day_key("2026-03-05T17:30:00+00:00").as_deref(),
            Some("2026-03-05")
        );
        assert_eq!(day_key("junk"), None);
    }
}
