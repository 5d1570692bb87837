//! Declared-balance extraction, independent of transaction parsing.

use anyhow::Result;
use regex::Regex;

use protea_core::ledger::{BalanceSource, StatementBalances};
use protea_core::money::AMOUNT_PATTERN;

fn balance_after(label: &str) -> String {
    // Label, optional "as at <date>" qualifier, then the amount and marker.
    // \s* spans line breaks: FNB sometimes prints the figure on the next line.
    format!(r"(?i){label}\s+balance(?:\s+as\s+at\s+\d{{1,2}}\s+[a-z]+\s+\d{{4}})?\s*:?\s*({AMOUNT_PATTERN})\s*(cr|dr)?\b")
}

fn capture_signed(pattern: &Regex, text: &str) -> Option<f64> {
    let caps = pattern.captures(text)?;
    let value: f64 = caps[1].replace(",", "").parse().ok()?;
    let negative = caps
        .get(2)
        .is_some_and(|m| m.as_str().eq_ignore_ascii_case("dr"));
    Some(if negative { -value } else { value })
}

/// Search the full document text for declared opening/closing balances.
///
/// Cr is positive, Dr negative, an unmarked balance positive. When no
/// closing balance is declared, the first Available/Current Balance line is
/// used instead and flagged as the lower-confidence source. Absent balances
/// stay `None`.
pub fn extract_balances(text: &str) -> Result<StatementBalances> {
    let opening = Regex::new(&balance_after("opening"))?;
    let closing = Regex::new(&balance_after("closing"))?;
    let available = Regex::new(&balance_after("(?:available|current)"))?;

    let mut balances = StatementBalances {
        opening: capture_signed(&opening, text),
        closing: capture_signed(&closing, text),
        closing_source: None,
    };

    if balances.closing.is_some() {
        balances.closing_source = Some(BalanceSource::ClosingBalance);
    } else if let Some(value) = capture_signed(&available, text) {
        balances.closing = Some(value);
        balances.closing_source = Some(BalanceSource::AvailableBalance);
    }

    Ok(balances)
}
