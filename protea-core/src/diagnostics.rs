//! Diagnostics for rows that could not be turned into ledger entries.
//!
//! Malformed rows are isolated and reported, never raised: one bad row must
//! not abort the rest of the statement, and one bad statement must not abort
//! the batch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A date-opening row that never reached an amount token within the
    /// stitching lookahead.
    UnterminatedCandidate { row_text: String },
    /// Day/month that do not combine with the resolved year into a valid
    /// calendar date.
    DateResolutionFailure {
        day: u32,
        month: u32,
        year: i32,
        row_text: String,
    },
    /// No statement year could be resolved from the document text. When a
    /// fallback year was supplied by the caller it is recorded here; dates
    /// built from it may be wrong for historical statements.
    YearUnresolved { fallback_year: Option<i32> },
}

impl Diagnostic {
    pub fn describe(&self) -> String {
        match self {
            Diagnostic::UnterminatedCandidate { row_text } => {
                format!("no amount found for candidate row: {row_text:?}")
            }
            Diagnostic::DateResolutionFailure {
                day,
                month,
                year,
                row_text,
            } => format!("invalid calendar date {day:02}/{month:02}/{year} in row: {row_text:?}"),
            Diagnostic::YearUnresolved { fallback_year } => match fallback_year {
                Some(y) => format!("statement year not found in text; fell back to {y}"),
                None => "statement year not found in text and no fallback supplied".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_unterminated() {
        let d = Diagnostic::UnterminatedCandidate {
            row_text: "03 Jan Some Purchase".to_string(),
        };
        assert!(d.describe().contains("03 Jan Some Purchase"));
    }

    #[test]
    fn test_describe_year_fallback() {
        let d = Diagnostic::YearUnresolved {
            fallback_year: Some(2025),
        };
        assert!(d.describe().contains("2025"));
    }
}
