//! Input shapes handed over by the external PDF-to-text collaborator.

use serde::{Deserialize, Serialize};

/// A positioned token from word-level extraction: bounding box plus text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub text: String,
}

/// One page of extracted statement content, in document order.
///
/// `Text` is a linearized text stream with embedded newlines; `Words` carries
/// per-token positions and lets the extractor recover visual rows even when
/// the stream order does not match reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageSource {
    Text(String),
    Words(Vec<Word>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_deserializes_from_json() {
        let json = r#"{"x0": 10.0, "y0": 100.5, "x1": 42.0, "y1": 110.5, "text": "WOOLWORTHS"}"#;
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word.text, "WOOLWORTHS");
        assert_eq!(word.y0, 100.5);
    }
}
