//! End-to-end statement pipeline: pages -> rows -> candidates -> ledger ->
//! reconciliation report. Pure over its input; statements can be processed
//! independently and merged afterwards.

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use protea_core::diagnostics::Diagnostic;
use protea_core::ledger::{ReconciliationReport, StatementBalances, Transaction};
use protea_core::money::AmountMatcher;
use protea_ingest::noise::NoiseFilter;
use protea_ingest::rows::Row;
use protea_ingest::words::PageSource;

use crate::balance::extract_balances;
use crate::candidate::collect_candidates;
use crate::ledger::build_ledger;
use crate::reconcile::build_report;
use crate::year::resolve_statement_year;

/// Caller-supplied knobs for one parsing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Reconciliation tolerance in ZAR.
    pub tolerance: f64,
    /// Year to use when the statement text does not declare one. `None`
    /// means undated statements produce no transactions, only diagnostics.
    pub fallback_year: Option<i32>,
    /// Extra noise patterns appended to the built-in set.
    pub extra_noise_patterns: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            tolerance: 0.01,
            fallback_year: None,
            extra_noise_patterns: Vec::new(),
        }
    }
}

/// Everything derived from one statement, held in memory for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub id: String,
    /// Resolved statement year, if any.
    pub year: Option<i32>,
    pub transactions: Vec<Transaction>,
    pub balances: StatementBalances,
    pub report: ReconciliationReport,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedStatement {
    /// Date of the earliest transaction, used to order statements for
    /// continuity checking.
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.transactions.iter().map(|t| t.date).min()
    }
}

/// Parse one statement's extracted pages into a reconciled ledger.
///
/// Per-row failures become diagnostics; an empty or unreadable source
/// yields a zero-transaction result rather than an error.
pub fn parse_statement(
    id: &str,
    pages: &[PageSource],
    options: &ParseOptions,
) -> Result<ParsedStatement> {
    let filter = NoiseFilter::with_extra_patterns(&options.extra_noise_patterns)?;
    let amounts = AmountMatcher::compile()?;

    // Year and balance declarations live in rows the noise filter drops,
    // so both extractors scan the unfiltered text.
    let all_rows = protea_ingest::rows::raw_rows(pages);
    let full_text = join_rows(&all_rows);

    let mut diagnostics = Vec::new();

    let resolution = resolve_statement_year(&full_text)?;
    let year = match resolution.year {
        Some(year) => Some(year),
        None => {
            diagnostics.push(Diagnostic::YearUnresolved {
                fallback_year: options.fallback_year,
            });
            options.fallback_year
        }
    };

    let balances = extract_balances(&full_text)?;

    let candidate_rows: Vec<Row> = all_rows
        .into_iter()
        .filter(|row| !filter.is_noise(&row.text))
        .collect();
    let (candidates, mut stitch_diagnostics) = collect_candidates(&candidate_rows, &amounts);
    diagnostics.append(&mut stitch_diagnostics);

    let transactions = match year {
        Some(year) => {
            let (transactions, mut ledger_diagnostics) =
                build_ledger(&candidates, year, balances.opening, id);
            diagnostics.append(&mut ledger_diagnostics);
            transactions
        }
        None => Vec::new(),
    };

    let report = build_report(id, &transactions, &balances);

    Ok(ParsedStatement {
        id: id.to_string(),
        year,
        transactions,
        balances,
        report,
        diagnostics,
    })
}

fn join_rows(rows: &[Row]) -> String {
    let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
    texts.join("\n")
}
