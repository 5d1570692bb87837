//! Ledger construction: date resolution, description cleaning and
//! authoritative sign resolution over a running-balance chain.

use chrono::NaiveDate;

use protea_core::diagnostics::Diagnostic;
use protea_core::ledger::{SignBasis, Transaction};
use protea_core::money::{Marker, round2};

use crate::candidate::TransactionCandidate;

fn is_numeric_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

/// Join description tokens, dropping leftover numeric and Cr/Dr tokens.
fn clean_description(tokens: &[String]) -> String {
    let kept: Vec<&str> = tokens
        .iter()
        .map(|t| t.as_str())
        .filter(|t| !is_numeric_token(t) && Marker::from_token(t).is_none())
        .collect();
    kept.join(" ")
}

/// Resolve each candidate into a signed transaction.
///
/// Sign priority: the delta against the previous running balance (seeded
/// with the opening balance) wins over the printed Cr/Dr marker, which wins
/// over the unmarked-is-debit default. The previous-balance state advances
/// whenever a row carries a balance, so deltas compound across the chain.
pub fn build_ledger(
    candidates: &[TransactionCandidate],
    year: i32,
    opening_balance: Option<f64>,
    statement_id: &str,
) -> (Vec<Transaction>, Vec<Diagnostic>) {
    let mut transactions = Vec::with_capacity(candidates.len());
    let mut diagnostics = Vec::new();
    let mut prev_balance = opening_balance;

    for candidate in candidates {
        let Some(date) = NaiveDate::from_ymd_opt(year, candidate.month, candidate.day) else {
            diagnostics.push(Diagnostic::DateResolutionFailure {
                day: candidate.day,
                month: candidate.month,
                year,
                row_text: candidate.opening_row_text.clone(),
            });
            continue;
        };

        let (amount, sign_basis) = match (candidate.running_balance, prev_balance) {
            (Some(curr), Some(prev)) => (round2(curr - prev), SignBasis::BalanceDelta),
            _ if candidate.amount.marker.is_some() => (candidate.amount.signed(), SignBasis::Marker),
            _ => (candidate.amount.signed(), SignBasis::DebitDefault),
        };

        if let Some(curr) = candidate.running_balance {
            prev_balance = Some(curr);
        }

        transactions.push(Transaction {
            date,
            description: clean_description(&candidate.description_tokens),
            amount,
            sign_basis,
            source_statement: statement_id.to_string(),
        });
    }

    (transactions, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use protea_core::money::AmountToken;

    fn candidate(
        day: u32,
        month: u32,
        desc: &[&str],
        value: f64,
        marker: Option<Marker>,
        balance: Option<f64>,
    ) -> TransactionCandidate {
        TransactionCandidate {
            day,
            month,
            description_tokens: desc.iter().map(|t| t.to_string()).collect(),
            amount: AmountToken { value, marker },
            running_balance: balance,
            opening_row_text: format!("{day:02} row"),
        }
    }

    #[test]
    fn test_balance_delta_beats_marker() {
        // Marker says credit, but the balance chain says 400 left the account.
        let candidates = vec![candidate(
            5,
            2,
            &["POS", "PURCHASE"],
            450.00,
            Some(Marker::Cr),
            Some(600.00),
        )];
        let (txns, diags) = build_ledger(&candidates, 2025, Some(1000.00), "stmt");
        assert!(diags.is_empty());
        assert_eq!(txns[0].amount, -400.00);
        assert_eq!(txns[0].sign_basis, SignBasis::BalanceDelta);
    }

    #[test]
    fn test_balance_chain_compounds() {
        let candidates = vec![
            candidate(1, 3, &["SALARY"], 500.00, None, Some(1500.00)),
            candidate(2, 3, &["POS"], 200.00, None, Some(1300.00)),
            candidate(3, 3, &["FEE"], 50.00, None, Some(1250.00)),
        ];
        let (txns, _) = build_ledger(&candidates, 2025, Some(1000.00), "stmt");
        let amounts: Vec<f64> = txns.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![500.00, -200.00, -50.00]);
        assert!(txns.iter().all(|t| t.sign_basis == SignBasis::BalanceDelta));
    }

    #[test]
    fn test_chain_survives_balanceless_row() {
        // The middle row prints no balance; its sign falls back to the
        // marker rule and the chain resumes from the last known balance.
        let candidates = vec![
            candidate(1, 3, &["A"], 100.00, None, Some(900.00)),
            candidate(2, 3, &["B"], 25.00, None, None),
            candidate(3, 3, &["C"], 75.00, None, Some(800.00)),
        ];
        let (txns, _) = build_ledger(&candidates, 2025, Some(1000.00), "stmt");
        assert_eq!(txns[0].amount, -100.00);
        assert_eq!(txns[1].amount, -25.00);
        assert_eq!(txns[1].sign_basis, SignBasis::DebitDefault);
        assert_eq!(txns[2].amount, -100.00);
        assert_eq!(txns[2].sign_basis, SignBasis::BalanceDelta);
    }

    #[test]
    fn test_marker_rule_without_balances() {
        let candidates = vec![
            candidate(4, 7, &["REFUND"], 120.00, Some(Marker::Cr), None),
            candidate(5, 7, &["POS"], 80.00, Some(Marker::Dr), None),
            candidate(6, 7, &["POS"], 60.00, None, None),
        ];
        let (txns, _) = build_ledger(&candidates, 2025, None, "stmt");
        assert_eq!(txns[0].amount, 120.00);
        assert_eq!(txns[0].sign_basis, SignBasis::Marker);
        assert_eq!(txns[1].amount, -80.00);
        assert_eq!(txns[2].amount, -60.00);
        assert_eq!(txns[2].sign_basis, SignBasis::DebitDefault);
    }

    #[test]
    fn test_invalid_date_is_diagnosed_not_fatal() {
        let candidates = vec![
            candidate(31, 2, &["GHOST"], 10.00, None, None),
            candidate(1, 3, &["REAL"], 20.00, None, None),
        ];
        let (txns, diags) = build_ledger(&candidates, 2025, None, "stmt");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "REAL");
        assert!(matches!(
            diags[0],
            Diagnostic::DateResolutionFailure { day: 31, month: 2, .. }
        ));
    }

    #[test]
    fn test_description_cleaning_strips_numeric_and_markers() {
        let candidates = vec![candidate(
            5,
            2,
            &["POS", "PURCHASE", "4,556.00", "Cr", "WOOLWORTHS"],
            450.00,
            None,
            None,
        )];
        let (txns, _) = build_ledger(&candidates, 2025, None, "stmt");
        assert_eq!(txns[0].description, "POS PURCHASE WOOLWORTHS");
    }
}
