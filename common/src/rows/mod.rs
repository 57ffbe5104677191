//! Mapping of raw backend JSON into display-ready rows.
//!
//! The backend's three data endpoints return structurally different, and
//! occasionally malformed, JSON. The mappers here are total: a malformed
//! element degrades into a visible placeholder row instead of aborting the
//! whole batch, and nothing past this boundary ever panics. Output length and
//! order are deterministic functions of input order.

use serde_json::Value;

use crate::model::field::FieldValue;
use crate::model::row::{ActionResult, DisplayRow, DATA_COLUMNS, FileResult};

/// Maps a `./loading_symbol` response: one element per requested symbol,
/// shaped `{docsymbol, body:{data:[record?]}}`.
pub fn map_lookup(raw: &Value) -> Vec<DisplayRow> {
    let Some(elements) = raw.as_array() else {
        return Vec::new();
    };
    elements.iter().map(map_lookup_element).collect()
}

fn map_lookup_element(element: &Value) -> DisplayRow {
    let symbol = element
        .get("docsymbol")
        .and_then(Value::as_str)
        .unwrap_or("Error")
        .to_string();

    let Some(data) = element.get("body").and_then(|b| b.get("data")).and_then(Value::as_array)
    else {
        // Structurally unexpected element: keep the batch, flag the row.
        return DisplayRow::ApiError { symbol };
    };

    match data.first() {
        Some(record) => {
            let fields = DATA_COLUMNS
                .iter()
                .map(|column| FieldValue::from_json(record.get(column.key)))
                .collect();
            DisplayRow::Found { symbol, fields }
        }
        None => DisplayRow::NotFound { symbol },
    }
}

/// Maps a `./create_metadata_ods` response: elements are either arrays
/// (flattened in place) or single result objects. Anything else becomes a
/// "Malformed response data" placeholder. Order is preserved as received.
pub fn map_actions(raw: &Value) -> Vec<ActionResult> {
    flatten(raw, action_from_value)
}

fn action_from_value(value: &Value) -> ActionResult {
    match value.as_object() {
        Some(obj) => ActionResult {
            docsymbol: text_field(obj.get("docsymbol")),
            text: text_field(obj.get("text")),
        },
        None => ActionResult {
            docsymbol: "Unknown".to_string(),
            text: "Malformed response data".to_string(),
        },
    }
}

/// Maps an `./exporttoodswithfile` response with the same flattening rule as
/// create/update. The caller shows the (possibly empty) results table on every
/// completion, so "ran but nothing to show" stays distinguishable from
/// "never ran".
pub fn map_file_results(raw: &Value) -> Vec<FileResult> {
    flatten(raw, file_from_value)
}

fn file_from_value(value: &Value) -> FileResult {
    match value.as_object() {
        Some(obj) => FileResult {
            filename: text_field(obj.get("filename")),
            docsymbol: text_field(obj.get("docsymbol")),
            language: text_field(obj.get("language")),
            jobnumber: text_field(obj.get("jobnumber")),
            result: text_field(obj.get("result")),
        },
        None => FileResult {
            filename: String::new(),
            docsymbol: "Unknown".to_string(),
            language: String::new(),
            jobnumber: String::new(),
            result: "Malformed response data".to_string(),
        },
    }
}

fn flatten<T>(raw: &Value, map_one: impl Fn(&Value) -> T) -> Vec<T> {
    let Some(elements) = raw.as_array() else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for element in elements {
        match element.as_array() {
            Some(nested) => out.extend(nested.iter().map(&map_one)),
            None => out.push(map_one(element)),
        }
    }
    out
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::NOT_FOUND;
    use serde_json::json;

    #[test]
    fn lookup_with_data_maps_to_found() {
        let raw = json!([{"docsymbol": "A", "body": {"data": [{"symbol": "A", "title_en": "T"}]}}]);
        let rows = map_lookup(&raw);
        assert_eq!(rows.len(), 1);
        let cells = rows[0].cells();
        assert_eq!(cells[0], "A");
        // Title column renders the record's value.
        assert_eq!(cells[7], "T");
        assert!(matches!(rows[0], DisplayRow::Found { .. }));
    }

    #[test]
    fn lookup_with_empty_data_fills_every_field_with_not_found() {
        let raw = json!([{"docsymbol": "A", "body": {"data": []}}]);
        let rows = map_lookup(&raw);
        assert_eq!(rows, vec![DisplayRow::NotFound { symbol: "A".into() }]);
        let cells = rows[0].cells();
        assert_eq!(cells[0], "A");
        assert!(cells[1..].iter().all(|c| c == NOT_FOUND));
    }

    #[test]
    fn malformed_lookup_element_does_not_abort_the_batch() {
        let raw = json!([
            {"docsymbol": "A", "body": {"data": []}},
            {"docsymbol": "B"},
            42,
            {"docsymbol": "C", "body": {"data": [{"symbol": "C"}]}}
        ]);
        let rows = map_lookup(&raw);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], DisplayRow::ApiError { symbol: "B".into() });
        assert_eq!(rows[2], DisplayRow::ApiError { symbol: "Error".into() });
        assert!(rows[2].cells()[1..].iter().all(|c| c == "API Error"));
        assert!(matches!(rows[3], DisplayRow::Found { .. }));
    }

    #[test]
    fn lookup_mapping_is_deterministic() {
        let raw = json!([{"docsymbol": "A", "body": {"data": []}}, {"docsymbol": "B"}]);
        assert_eq!(map_lookup(&raw), map_lookup(&raw));
    }

    #[test]
    fn actions_flatten_nested_arrays_in_order() {
        let raw = json!([
            [{"docsymbol": "A", "text": "Metadata created!!!"},
             {"docsymbol": "B", "text": "Metadata updated!!!"}],
            {"docsymbol": "C", "text": "Metadata not found in the Central DB/ME"}
        ]);
        let rows = map_actions(&raw);
        assert_eq!(
            rows.iter().map(|r| r.docsymbol.as_str()).collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn malformed_action_elements_become_placeholders() {
        let raw = json!([{"docsymbol": "A", "text": "ok"}, "oops", null]);
        let rows = map_actions(&raw);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].docsymbol, "Unknown");
        assert_eq!(rows[1].text, "Malformed response data");
        assert_eq!(rows[2].text, "Malformed response data");
    }

    #[test]
    fn file_results_keep_all_columns() {
        let raw = json!([[{
            "filename": "a.pdf",
            "docsymbol": "A",
            "language": "EN",
            "jobnumber": "NY1",
            "result": "sent"
        }]]);
        let rows = map_file_results(&raw);
        assert_eq!(
            rows[0].cells(),
            vec!["a.pdf", "A", "EN", "NY1", "sent"]
        );
    }

    #[test]
    fn empty_file_response_maps_to_empty_rows() {
        assert!(map_file_results(&json!([])).is_empty());
        // Non-array payloads degrade to an empty row set, not a panic.
        assert!(map_file_results(&json!({"status": "NOK"})).is_empty());
    }
}
