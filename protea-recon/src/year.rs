//! Statement-year resolution.
//!
//! Transaction rows carry day and month only; the year is resolved once per
//! document from the full text. The engine never substitutes the wall-clock
//! year itself — an unresolved year is reported and the caller decides on a
//! fallback.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which declaration the year was taken from, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearSource {
    /// "Statement Date : 14 May 2025"
    StatementDate,
    /// "Statement Period : 01 April 2025 to 30 April 2025" (ending year)
    PeriodEnd,
    /// "as at 31 May 2025"
    AsAt,
    /// A bare 4-digit token starting with "20".
    BareYear,
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearResolution {
    pub year: Option<i32>,
    pub source: YearSource,
}

/// Resolve the statement year from the full document text.
pub fn resolve_statement_year(text: &str) -> Result<YearResolution> {
    let statement_date = Regex::new(r"(?i)statement\s+date\s*:?\s*\d{1,2}\s+[a-z]+\s+(\d{4})")?;
    let period_end = Regex::new(r"(?i)period\b[^\r\n]*?\bto\b[^\r\n]*?\b(20\d{2})\b")?;
    let as_at = Regex::new(r"(?i)\bas\s+at\s+\d{1,2}\s+[a-z]+\s+(\d{4})")?;
    let bare_year = Regex::new(r"\b(20\d{2})\b")?;

    let candidates = [
        (&statement_date, YearSource::StatementDate),
        (&period_end, YearSource::PeriodEnd),
        (&as_at, YearSource::AsAt),
        (&bare_year, YearSource::BareYear),
    ];

    for (pattern, source) in candidates {
        if let Some(caps) = pattern.captures(text) {
            if let Ok(year) = caps[1].parse::<i32>() {
                return Ok(YearResolution {
                    year: Some(year),
                    source,
                });
            }
        }
    }

    Ok(YearResolution {
        year: None,
        source: YearSource::Unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_date_wins() {
        let text = "First National Bank\nStatement Date : 14 May 2025\nPeriod 01 Apr 2024 to 30 Apr 2024";
        let r = resolve_statement_year(text).unwrap();
        assert_eq!(r.year, Some(2025));
        assert_eq!(r.source, YearSource::StatementDate);
    }

    #[test]
    fn test_period_takes_ending_year() {
        let text = "Statement Period : 15 December 2024 to 14 January 2025";
        let r = resolve_statement_year(text).unwrap();
        assert_eq!(r.year, Some(2025));
        assert_eq!(r.source, YearSource::PeriodEnd);
    }

    #[test]
    fn test_as_at_declaration() {
        let text = "Closing Balance as at 31 May 2025";
        let r = resolve_statement_year(text).unwrap();
        assert_eq!(r.year, Some(2025));
        assert_eq!(r.source, YearSource::AsAt);
    }

    #[test]
    fn test_bare_year_fallback() {
        let text = "Some header 2023 reference";
        let r = resolve_statement_year(text).unwrap();
        assert_eq!(r.year, Some(2023));
        assert_eq!(r.source, YearSource::BareYear);
    }

    #[test]
    fn test_unresolved_when_no_year_present() {
        let r = resolve_statement_year("05 Feb POS PURCHASE 450.00").unwrap();
        assert_eq!(r.year, None);
        assert_eq!(r.source, YearSource::Unresolved);
    }
}
