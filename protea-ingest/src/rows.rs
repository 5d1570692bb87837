//! Row reconstruction: grouping extracted content into visual table rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::noise::NoiseFilter;
use crate::words::{PageSource, Word};

/// One reconstructed visual line of statement text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Tokens in left-to-right order.
    pub tokens: Vec<String>,
    /// Tokens joined with single spaces.
    pub text: String,
}

impl Row {
    pub fn from_tokens(tokens: Vec<String>) -> Row {
        let text = tokens.join(" ");
        Row { tokens, text }
    }

    pub fn from_line(line: &str) -> Row {
        Row::from_tokens(line.split_whitespace().map(|t| t.to_string()).collect())
    }
}

/// Group positioned words into rows.
///
/// Words sharing a vertical coordinate within one decimal of the page unit
/// form one row; rows are emitted top-to-bottom, tokens left-to-right. This
/// recovers visual order even when the underlying text stream is shuffled.
pub fn rows_from_words(words: &[Word]) -> Vec<Row> {
    let mut by_line: BTreeMap<i64, Vec<&Word>> = BTreeMap::new();
    for word in words {
        let key = (word.y0 * 10.0).round() as i64;
        by_line.entry(key).or_default().push(word);
    }

    let mut rows = Vec::with_capacity(by_line.len());
    for (_, mut line) in by_line {
        line.sort_by(|a, b| a.x0.total_cmp(&b.x0));
        let tokens: Vec<String> = line
            .iter()
            .map(|w| w.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !tokens.is_empty() {
            rows.push(Row::from_tokens(tokens));
        }
    }
    rows
}

/// Split a linearized text stream into rows, one per non-empty line.
pub fn rows_from_text(text: &str) -> Vec<Row> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Row::from_line)
        .collect()
}

/// All rows across pages in document order, noise included.
///
/// Balance and year extraction scan this full sequence; transaction parsing
/// works on the filtered output of [`extract_rows`].
pub fn raw_rows(pages: &[PageSource]) -> Vec<Row> {
    let mut rows = Vec::new();
    for page in pages {
        match page {
            PageSource::Text(text) => rows.extend(rows_from_text(text)),
            PageSource::Words(words) => rows.extend(rows_from_words(words)),
        }
    }
    rows
}

/// Ordered candidate rows with structural noise suppressed.
///
/// Relative order is preserved and no row is duplicated. An empty input
/// (an unreadable or image-only source) yields an empty sequence.
pub fn extract_rows(pages: &[PageSource], filter: &NoiseFilter) -> Vec<Row> {
    raw_rows(pages)
        .into_iter()
        .filter(|row| !filter.is_noise(&row.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(x0: f64, y0: f64, text: &str) -> Word {
        Word {
            x0,
            y0,
            x1: x0 + 10.0,
            y1: y0 + 8.0,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_rows_from_words_recovers_visual_order() {
        // Stream order is shuffled; positions are not.
        let words = vec![
            word(120.0, 200.02, "WOOLWORTHS"),
            word(30.0, 100.0, "05"),
            word(300.0, 200.0, "450.00"),
            word(55.0, 99.98, "Feb"),
            word(30.0, 200.01, "POS"),
        ];
        let rows = rows_from_words(&words);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "05 Feb");
        assert_eq!(rows[1].text, "POS WOOLWORTHS 450.00");
    }

    #[test]
    fn test_rows_from_text_drops_blank_lines() {
        let rows = rows_from_text("05 Feb POS PURCHASE\n\n   \n450.00\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "05 Feb POS PURCHASE");
        assert_eq!(rows[1].text, "450.00");
    }

    #[test]
    fn test_extract_rows_preserves_order_and_filters_noise() {
        let pages = vec![
            PageSource::Text("Date Description Amount Balance\n05 Feb AAA\n100.00".to_string()),
            PageSource::Text("Page 2 of 5\n06 Feb BBB\n200.00".to_string()),
        ];
        let filter = NoiseFilter::compile().unwrap();
        let rows = extract_rows(&pages, &filter);
        let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["05 Feb AAA", "100.00", "06 Feb BBB", "200.00"]);
    }

    #[test]
    fn test_empty_source_yields_empty_sequence() {
        let filter = NoiseFilter::compile().unwrap();
        assert!(extract_rows(&[], &filter).is_empty());
        assert!(extract_rows(&[PageSource::Text(String::new())], &filter).is_empty());
    }
}
