//! Loading extracted statement content from disk.
//!
//! The PDF-to-text step is an external collaborator; this tool consumes its
//! output: plain page text (form-feed separated) or JSON word dumps shaped
//! as an array of pages, each an array of {x0, y0, x1, y1, text} objects.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use protea_ingest::words::{PageSource, Word};

pub fn load_pages(path: &Path) -> Result<Vec<PageSource>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext.eq_ignore_ascii_case("json") {
        let pages: Vec<Vec<Word>> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing word dump {}", path.display()))?;
        return Ok(pages.into_iter().map(PageSource::Words).collect());
    }

    if raw.trim().is_empty() {
        bail!("{}: no extractable text", path.display());
    }
    Ok(raw
        .split('\x0C')
        .map(|page| PageSource::Text(page.to_string()))
        .collect())
}
