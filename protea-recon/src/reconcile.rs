//! Reconciliation of the transaction ledger against declared balances, and
//! closing-to-opening continuity across multiple statements.

use serde::{Deserialize, Serialize};

use protea_core::ledger::{ReconciliationReport, StatementBalances, Transaction};
use protea_core::money::round2;

use crate::statement::ParsedStatement;

/// Build the per-statement report. Fields that depend on a missing balance
/// are left `None`; a mismatch is data for the caller, never an error.
pub fn build_report(
    statement_id: &str,
    transactions: &[Transaction],
    balances: &StatementBalances,
) -> ReconciliationReport {
    let net = round2(transactions.iter().map(|t| t.amount).sum());
    let expected_closing = balances.opening.map(|opening| round2(opening + net));
    let difference = match (balances.closing, expected_closing) {
        (Some(actual), Some(expected)) => Some(round2(actual - expected)),
        _ => None,
    };

    ReconciliationReport {
        statement_id: statement_id.to_string(),
        opening: balances.opening,
        net,
        expected_closing,
        actual_closing: balances.closing,
        difference,
        transaction_count: transactions.len(),
    }
}

/// A closing/opening gap between consecutive statements, usually a missing
/// statement or a misordered upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuityBreak {
    pub from_statement: String,
    pub to_statement: String,
    pub closing: f64,
    pub opening: f64,
    pub gap: f64,
}

/// Order statements by their earliest transaction date and flag pairs whose
/// closing and opening balances disagree beyond `tolerance`. Pairs missing
/// either balance are skipped, not flagged.
pub fn check_continuity(statements: &[ParsedStatement], tolerance: f64) -> Vec<ContinuityBreak> {
    let mut dated: Vec<&ParsedStatement> = statements
        .iter()
        .filter(|s| s.earliest_date().is_some())
        .collect();
    dated.sort_by_key(|s| s.earliest_date());

    let mut breaks = Vec::new();
    for pair in dated.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let (Some(closing), Some(opening)) = (prev.balances.closing, next.balances.opening) else {
            continue;
        };
        let gap = round2(opening - closing);
        if gap.abs() > tolerance {
            breaks.push(ContinuityBreak {
                from_statement: prev.id.clone(),
                to_statement: next.id.clone(),
                closing,
                opening,
                gap,
            });
        }
    }
    breaks
}
