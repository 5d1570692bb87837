//! Amount-token parsing and formatting.
//!
//! Statement amounts are printed unsigned with thousands separators and an
//! optional Cr/Dr marker, attached ("450.00Cr") or as a separate token.
//! Unmarked amounts are debits on the observed statement format.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// An amount-shaped token: grouped digits with exactly two fractional digits.
pub const AMOUNT_PATTERN: &str = r"\d{1,3}(?:,\d{3})*\.\d{2}";

/// A standalone credit/debit marker token.
pub const MARKER_PATTERN: &str = r"(?i)^(?:cr|dr)$";

/// Credit/debit marker attached to or following an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Cr,
    Dr,
}

impl Marker {
    pub fn from_token(tok: &str) -> Option<Marker> {
        match tok.to_ascii_lowercase().as_str() {
            "cr" => Some(Marker::Cr),
            "dr" => Some(Marker::Dr),
            _ => None,
        }
    }
}

/// An amount token parsed from statement text: unsigned magnitude plus the
/// marker that was printed with it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountToken {
    pub value: f64,
    pub marker: Option<Marker>,
}

impl AmountToken {
    /// Signed value under the transaction convention: Cr is an inflow,
    /// Dr or no marker is an outflow.
    pub fn signed(&self) -> f64 {
        match self.marker {
            Some(Marker::Cr) => self.value,
            Some(Marker::Dr) | None => -self.value,
        }
    }

    /// Signed value under the balance convention: only an explicit Dr
    /// flips the sign. Printed balances are positive unless overdrawn.
    pub fn balance_signed(&self) -> f64 {
        match self.marker {
            Some(Marker::Dr) => -self.value,
            _ => self.value,
        }
    }
}

/// Compiled matchers for amount-shaped tokens.
pub struct AmountMatcher {
    token: Regex,
}

impl AmountMatcher {
    pub fn compile() -> Result<AmountMatcher> {
        let token = Regex::new(&format!(r"(?i)^({AMOUNT_PATTERN})(cr|dr)?$"))?;
        Ok(AmountMatcher { token })
    }

    /// Match a whole token as an amount, accepting an attached Cr/Dr suffix.
    pub fn match_token(&self, tok: &str) -> Option<AmountToken> {
        let caps = self.token.captures(tok.trim())?;
        let value: f64 = caps[1].replace(",", "").parse().ok()?;
        let marker = caps.get(2).and_then(|m| Marker::from_token(m.as_str()));
        Some(AmountToken { value, marker })
    }
}

/// Round to two decimals (cents).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a signed amount back into its canonical statement form:
/// thousands-separated magnitude, credits suffixed with "Cr", debits bare.
/// Re-parsing the result through [`AmountMatcher`] yields the same value.
pub fn format_amount(value: f64) -> String {
    let magnitude = group_thousands(value.abs());
    if value >= 0.0 {
        format!("{magnitude}Cr")
    } else {
        magnitude
    }
}

fn group_thousands(magnitude: f64) -> String {
    let plain = format!("{magnitude:.2}");
    let (whole, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let mut grouped = String::new();
    let digits: Vec<char> = whole.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    format!("{grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_plain_amount() {
        let m = AmountMatcher::compile().unwrap();
        let tok = m.match_token("1,234.56").unwrap();
        assert_eq!(tok.value, 1234.56);
        assert_eq!(tok.marker, None);
        assert_eq!(tok.signed(), -1234.56);
    }

    #[test]
    fn test_match_attached_marker() {
        let m = AmountMatcher::compile().unwrap();
        let tok = m.match_token("450.00Cr").unwrap();
        assert_eq!(tok.marker, Some(Marker::Cr));
        assert_eq!(tok.signed(), 450.00);

        let tok = m.match_token("12.50DR").unwrap();
        assert_eq!(tok.marker, Some(Marker::Dr));
        assert_eq!(tok.signed(), -12.50);
    }

    #[test]
    fn test_rejects_non_amounts() {
        let m = AmountMatcher::compile().unwrap();
        assert!(m.match_token("1234.5").is_none());
        assert!(m.match_token("12,34.56").is_none());
        assert!(m.match_token("woolworths").is_none());
        assert!(m.match_token("05").is_none());
    }

    #[test]
    fn test_format_parse_idempotent() {
        let m = AmountMatcher::compile().unwrap();
        for value in [-450.00, 1250.00, -1234567.89, 0.01, -0.01, 0.0] {
            let formatted = format_amount(value);
            let parsed = m.match_token(&formatted).unwrap().signed();
            assert_eq!(parsed, value, "round-trip of {formatted}");
        }
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_amount(-1234567.89), "1,234,567.89");
        assert_eq!(format_amount(500.0), "500.00Cr");
    }

    #[test]
    fn test_balance_signed() {
        let m = AmountMatcher::compile().unwrap();
        assert_eq!(m.match_token("100.00").unwrap().balance_signed(), 100.00);
        assert_eq!(m.match_token("100.00Dr").unwrap().balance_signed(), -100.00);
        assert_eq!(m.match_token("100.00Cr").unwrap().balance_signed(), 100.00);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1249.999999), 1250.00);
        assert_eq!(round2(-123.456), -123.46);
    }
}
