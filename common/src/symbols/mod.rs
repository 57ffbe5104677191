//! Normalization and validation of free-text document-symbol lists.
//!
//! Users paste one document symbol per line. Before anything is sent to the
//! backend the text is normalized (lines trimmed, empties dropped) and
//! validated: an empty list or a list containing duplicates blocks the
//! submission entirely, so no partial request is ever issued.

use thiserror::Error;

/// Validation failures for a pasted symbol list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: please paste at least one document symbol")]
    EmptyInput { field: String },

    #[error("{field}: duplicate symbols found: {}", duplicates.join(", "))]
    DuplicateSymbols {
        field: String,
        duplicates: Vec<String>,
    },
}

/// Splits `raw` on newlines, trims leading/trailing whitespace from each line
/// and drops lines that become empty. Internal spacing and case are preserved.
/// Idempotent: normalizing already-normalized text is a no-op.
pub fn normalize(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalizes `raw` and rejects empty or duplicated input.
///
/// Duplicates are compared case-sensitively and each distinct duplicate is
/// reported once, in first-occurrence order.
pub fn validate(raw: &str, field: &str) -> Result<Vec<String>, ValidationError> {
    let symbols = normalize(raw);

    if symbols.is_empty() {
        return Err(ValidationError::EmptyInput {
            field: field.to_string(),
        });
    }

    let mut seen = Vec::new();
    let mut duplicates = Vec::new();
    for symbol in &symbols {
        if seen.contains(symbol) {
            if !duplicates.contains(symbol) {
                duplicates.push(symbol.clone());
            }
        } else {
            seen.push(symbol.clone());
        }
    }

    if !duplicates.is_empty() {
        return Err(ValidationError::DuplicateSymbols {
            field: field.to_string(),
            duplicates,
        });
    }

    Ok(symbols)
}

/// Joins a normalized list back into the newline-delimited submission form.
pub fn submission_text(symbols: &[String]) -> String {
    symbols.join("\n")
}

/// Upper-cases every symbol. Only the lookup path does this before submitting;
/// create/update and send-file submissions preserve the pasted case.
pub fn uppercased(symbols: &[String]) -> Vec<String> {
    symbols.iter().map(|s| s.to_uppercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_drops_empty_lines() {
        assert_eq!(normalize("A\n \nB"), vec!["A", "B"]);
        assert_eq!(normalize("  A/RES/1  \n\nB"), vec!["A/RES/1", "B"]);
    }

    #[test]
    fn normalize_preserves_internal_spaces_and_case() {
        assert_eq!(normalize(" a res 1 "), vec!["a res 1"]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = "  A/RES/1 \n\n b \nC\n";
        let once = normalize(raw);
        let twice = normalize(&once.join("\n"));
        assert_eq!(once, twice);
    }

    #[test]
    fn validate_rejects_empty_input() {
        assert_eq!(
            validate("", "Document Symbols"),
            Err(ValidationError::EmptyInput {
                field: "Document Symbols".to_string()
            })
        );
        assert!(matches!(
            validate(" \n \n", "Document Symbols"),
            Err(ValidationError::EmptyInput { .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicates_listing_each_once() {
        assert_eq!(
            validate("A\nA", "Document Symbols"),
            Err(ValidationError::DuplicateSymbols {
                field: "Document Symbols".to_string(),
                duplicates: vec!["A".to_string()]
            })
        );
        assert_eq!(
            validate("A\nB\nA\nB\nA", "Document Symbols"),
            Err(ValidationError::DuplicateSymbols {
                field: "Document Symbols".to_string(),
                duplicates: vec!["A".to_string(), "B".to_string()]
            })
        );
    }

    #[test]
    fn validate_is_case_sensitive_for_duplicates() {
        assert_eq!(validate("A\na", "f"), Ok(vec!["A".to_string(), "a".to_string()]));
    }

    #[test]
    fn validate_accepts_blank_lines_between_symbols() {
        assert_eq!(
            validate("A\n \nB", "Document Symbols"),
            Ok(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn uppercasing_applies_to_every_symbol() {
        let list = vec!["a/res/1".to_string(), "S/2026/5".to_string()];
        assert_eq!(uppercased(&list), vec!["A/RES/1", "S/2026/5"]);
        assert_eq!(submission_text(&uppercased(&list)), "A/RES/1\nS/2026/5");
    }
}
