//! protea-ingest: statement text extraction — row reconstruction from
//! extracted page text or word positions, with structural noise filtering.

pub mod noise;
pub mod rows;
pub mod words;

pub use noise::{NOISE_PATTERNS, NoiseFilter};
pub use rows::{Row, extract_rows, raw_rows, rows_from_text, rows_from_words};
pub use words::{PageSource, Word};
