//! Ledger record types shared across the extraction and reconciliation crates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a transaction's sign was decided.
///
/// `BalanceDelta` is authoritative; `Marker` relies on the printed Cr/Dr
/// suffix; `DebitDefault` is the degraded case where an unmarked amount is
/// assumed to be an outflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignBasis {
    #[serde(rename = "balance-delta")]
    BalanceDelta,
    #[serde(rename = "marker")]
    Marker,
    #[serde(rename = "debit-default")]
    DebitDefault,
}

/// A reconstructed statement transaction (bank-agnostic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Whitespace-normalized description with amount/marker tokens stripped.
    pub description: String,
    /// Signed ZAR amount: debits negative, credits positive.
    pub amount: f64,
    pub sign_basis: SignBasis,
    /// Identifier of the statement this row came from.
    pub source_statement: String,
}

impl Transaction {
    /// Returns true if this is an outflow (negative amount)
    pub fn is_debit(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is an inflow (positive amount)
    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Where the closing balance figure was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSource {
    #[serde(rename = "closing-balance")]
    ClosingBalance,
    /// Fallback from an "Available Balance" / "Current Balance" line;
    /// lower confidence than an explicit closing balance.
    #[serde(rename = "available-balance")]
    AvailableBalance,
}

/// Opening/closing balances declared in the statement text. Either may be
/// absent when the statement does not print them in a recognized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementBalances {
    pub opening: Option<f64>,
    pub closing: Option<f64>,
    pub closing_source: Option<BalanceSource>,
}

/// Per-statement reconciliation of the transaction ledger against declared
/// balances. Fields depending on a missing balance stay `None` rather than
/// being computed from a fabricated zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub statement_id: String,
    pub opening: Option<f64>,
    /// Sum of signed transaction amounts.
    pub net: f64,
    /// `opening + net`, when the opening balance is known.
    pub expected_closing: Option<f64>,
    pub actual_closing: Option<f64>,
    /// `actual_closing - expected_closing`, when both are known.
    pub difference: Option<f64>,
    pub transaction_count: usize,
}

impl ReconciliationReport {
    /// Whether the statement reconciles within `tolerance`. `None` when the
    /// difference could not be computed (a missing balance).
    pub fn reconciles(&self, tolerance: f64) -> Option<bool> {
        self.difference.map(|d| d.abs() <= tolerance)
    }

    pub fn summary(&self) -> String {
        let fmt = |v: Option<f64>| match v {
            Some(v) => format!("{v:.2}"),
            None => "n/a".to_string(),
        };
        format!(
            "{}: {} txns, opening {}, net {:.2}, expected {}, actual {}, difference {}",
            self.statement_id,
            self.transaction_count,
            fmt(self.opening),
            self.net,
            fmt(self.expected_closing),
            fmt(self.actual_closing),
            fmt(self.difference),
        )
    }
}
