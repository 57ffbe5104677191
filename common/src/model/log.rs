//! Audit-log entries and client-side filtering.
//!
//! Logs are loaded once from `./display_logs` and held in memory for the
//! session; filtering never mutates the loaded collection.

use serde_json::Value;

use super::field::{self, extract_date};

/// One audit-log entry, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub user: String,
    pub action: String,
    /// Raw ISO-ish timestamp extracted from the wire `{date:{$date}}` shape.
    pub date: String,
}

impl AuditLogEntry {
    /// Decodes one wire element. Tolerant: entries missing a field decode
    /// with that field empty rather than dropping the element.
    pub fn from_json(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        AuditLogEntry {
            user: text("user"),
            action: text("action"),
            date: value
                .get("date")
                .and_then(extract_date)
                .unwrap_or_default(),
        }
    }

    /// Display rendering of the timestamp (`DD/MM/YYYY HH:MM:SS`).
    pub fn display_date(&self) -> String {
        field::format_date(&self.date)
    }

    fn day_key(&self) -> Option<String> {
        field::day_key(&self.date)
    }
}

/// Decodes the full `./display_logs` payload.
pub fn from_response(raw: &Value) -> Vec<AuditLogEntry> {
    raw.as_array()
        .map(|items| items.iter().map(AuditLogEntry::from_json).collect())
        .unwrap_or_default()
}

/// The three optional log filters. Empty fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub user: String,
    pub action: String,
    /// Calendar day in `YYYY-MM-DD` form (the date input's native format).
    pub date: String,
}

impl LogQuery {
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.action.is_empty() && self.date.is_empty()
    }
}

/// Applies the query: present predicates are ANDed, each a case-insensitive
/// substring match; the date predicate compares against the entry's date
/// truncated to calendar-day granularity. Pure and order-preserving.
pub fn filter<'a>(entries: &'a [AuditLogEntry], query: &LogQuery) -> Vec<&'a AuditLogEntry> {
    entries
        .iter()
        .filter(|entry| {
            contains_ci(&entry.user, &query.user)
                && contains_ci(&entry.action, &query.action)
                && matches_day(entry, &query.date)
        })
        .collect()
}

/// Header plus the rows of the log table after applying `query`, as display
/// strings. This is what the CSV exporter receives, so the download always
/// matches the rendered (filtered) table.
pub fn export_snapshot(entries: &[AuditLogEntry], query: &LogQuery) -> Vec<Vec<String>> {
    std::iter::once(vec![
        "User".to_string(),
        "Action".to_string(),
        "Date".to_string(),
    ])
    .chain(filter(entries, query).into_iter().map(|entry| {
        vec![
            entry.user.clone(),
            entry.action.clone(),
            entry.display_date(),
        ]
    }))
    .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_day(entry: &AuditLogEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    entry
        .day_key()
        .is_some_and(|day| day.contains(&needle.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<AuditLogEntry> {
        from_response(&json!([
            {"user": "Eric.T", "action": "Connected to the system!!!",
             "date": {"$date": "2026-03-05T08:00:00Z"}},
            {"user": "maria", "action": "Site added",
             "date": {"$date": "2026-03-06T09:30:00Z"}},
            {"user": "ERICA", "action": "Disconnected",
             "date": {"$date": "2026-03-06T10:00:00Z"}}
        ]))
    }

    #[test]
    fn user_filter_is_case_insensitive_substring() {
        let logs = sample();
        let before = logs.clone();
        let hits = filter(&logs, &LogQuery {
            user: "eric".into(),
            ..LogQuery::default()
        });
        assert_eq!(
            hits.iter().map(|e| e.user.as_str()).collect::<Vec<_>>(),
            vec!["Eric.T", "ERICA"]
        );
        // Filtering never mutates the loaded collection.
        assert_eq!(logs, before);
    }

    #[test]
    fn predicates_are_anded() {
        let logs = sample();
        let hits = filter(&logs, &LogQuery {
            user: "eric".into(),
            action: "connected".into(),
            ..LogQuery::default()
        });
        assert_eq!(hits.len(), 2);

        let hits = filter(&logs, &LogQuery {
            user: "eric".into(),
            action: "site".into(),
            ..LogQuery::default()
        });
        assert!(hits.is_empty());
    }

    #[test]
    fn date_filter_truncates_to_day() {
        let logs = sample();
        let hits = filter(&logs, &LogQuery {
            date: "2026-03-06".into(),
            ..LogQuery::default()
        });
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let logs = sample();
        let hits = filter(&logs, &LogQuery::default());
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].user, "Eric.T");
    }

    #[test]
    fn export_snapshot_contains_only_the_filtered_rows() {
        let logs = sample();
        let snapshot = export_snapshot(&logs, &LogQuery {
            user: "eric".into(),
            ..LogQuery::default()
        });
        assert_eq!(snapshot[0], ["User", "Action", "Date"]);
        // Two of the three sample entries match; "maria" must not leak in.
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[1][0], "Eric.T");
        assert_eq!(snapshot[2][0], "ERICA");

        let unfiltered = export_snapshot(&logs, &LogQuery::default());
        assert_eq!(unfiltered.len(), 4);
    }

    #[test]
    fn malformed_entries_decode_with_empty_fields() {
        let logs = from_response(&json!([{"action": "only action"}]));
        assert_eq!(logs[0].user, "");
        assert_eq!(logs[0].action, "only action");
        assert_eq!(logs[0].display_date(), "Invalid date");
    }
}
