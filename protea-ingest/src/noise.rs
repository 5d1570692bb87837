//! Structural noise patterns: headers, footers and boilerplate that must
//! never reach the transaction parser.

use anyhow::{Context, Result};
use regex::Regex;

/// Built-in noise patterns for the FNB statement layout.
///
/// Balance declaration lines are suppressed here because they are consumed
/// by the balance extractor, not parsed as transactions.
pub const NOISE_PATTERNS: &[&str] = &[
    // Page footers
    r"(?i)^page\s+\d+\s+of\s+\d+$",
    // Column-header captions
    r"(?i)^date\s+description\s+amount\s+balance$",
    // Bank / branch / account headers
    r"(?i)^first\s+national\s+bank",
    r"(?i)^branch\s+(code|name|number)",
    r"(?i)^account\s+(number|holder|type)",
    r"(?i)^statement\s+(date|number|period)",
    r"(?i)^period\b.*\bto\b",
    // Fee / VAT / interest disclosures
    r"(?i)inclusive\s+of\s+vat",
    r"(?i)^vat\s+(registration|reg\s*no)",
    r"(?i)interest\s+rate",
    r"(?i)^bank\s+charges\b",
    // Balance declarations, consumed by the balance extractor
    r"(?i)^(opening|closing)\s+balance\b",
    r"(?i)^(available|current)\s+balance\b",
];

/// Compiled row filter: built-in patterns plus caller-supplied extras.
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl NoiseFilter {
    /// Compile the built-in pattern set.
    pub fn compile() -> Result<NoiseFilter> {
        NoiseFilter::with_extra_patterns(&[])
    }

    /// Compile the built-in set plus additional configured patterns.
    pub fn with_extra_patterns(extra: &[String]) -> Result<NoiseFilter> {
        let mut patterns = Vec::with_capacity(NOISE_PATTERNS.len() + extra.len());
        for pattern in NOISE_PATTERNS {
            patterns.push(Regex::new(pattern).with_context(|| format!("bad noise pattern {pattern:?}"))?);
        }
        for pattern in extra {
            patterns.push(
                Regex::new(pattern)
                    .with_context(|| format!("bad configured noise pattern {pattern:?}"))?,
            );
        }
        Ok(NoiseFilter { patterns })
    }

    pub fn is_noise(&self, row_text: &str) -> bool {
        let text = row_text.trim();
        self.patterns.iter().any(|p| p.is_match(text))
    }
}
