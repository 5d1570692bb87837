//! Transaction-candidate stitching.
//!
//! A candidate opens at a row whose leading tokens form (day, 3-letter
//! month) and closes at the first amount-shaped token, which may sit on the
//! same row or several rows later when descriptions wrap. The next
//! amount-shaped token before the next date opener is the running balance.

use protea_core::diagnostics::Diagnostic;
use protea_core::money::{AmountMatcher, AmountToken, Marker};
use protea_ingest::rows::Row;

/// Rows scanned past the opener before a candidate is declared unterminated.
pub const MAX_LOOKAHEAD: usize = 6;

/// A date-opening row block pending date and sign resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionCandidate {
    pub day: u32,
    pub month: u32,
    /// Everything between the date and the amount, in order.
    pub description_tokens: Vec<String>,
    pub amount: AmountToken,
    /// Running account balance printed alongside this transaction.
    pub running_balance: Option<f64>,
    /// Text of the opening row, kept for diagnostics.
    pub opening_row_text: String,
}

fn month_number(token: &str) -> Option<u32> {
    match token.to_ascii_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

fn parse_day(token: &str) -> Option<u32> {
    let day: u32 = token.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

/// Does this row open a transaction block? Returns (day, month, tokens
/// consumed). Accepts "05 Feb" as two tokens or "05Feb" fused into one.
pub fn date_opening(row: &Row) -> Option<(u32, u32, usize)> {
    let first = row.tokens.first()?;

    if let Some(day) = parse_day(first) {
        let month = month_number(row.tokens.get(1)?)?;
        return Some((day, month, 2));
    }

    if first.len() == 5 {
        let (day_part, month_part) = first.split_at(2);
        if let (Some(day), Some(month)) = (parse_day(day_part), month_number(month_part)) {
            return Some((day, month, 1));
        }
    }

    None
}

/// Walk the row sequence and stitch transaction candidates.
///
/// Openers that never reach an amount within [`MAX_LOOKAHEAD`] rows (or
/// before the next opener) are reported as unterminated diagnostics and
/// excluded; scanning always continues with the rest of the document.
pub fn collect_candidates(
    rows: &[Row],
    amounts: &AmountMatcher,
) -> (Vec<TransactionCandidate>, Vec<Diagnostic>) {
    let mut candidates = Vec::new();
    let mut diagnostics = Vec::new();

    let mut i = 0;
    while i < rows.len() {
        let Some((day, month, consumed)) = date_opening(&rows[i]) else {
            i += 1;
            continue;
        };

        match stitch_block(rows, i, consumed, day, month, amounts) {
            Some((candidate, resume)) => {
                candidates.push(candidate);
                i = resume;
            }
            None => {
                diagnostics.push(Diagnostic::UnterminatedCandidate {
                    row_text: rows[i].text.clone(),
                });
                i += 1;
            }
        }
    }

    (candidates, diagnostics)
}

/// Stitch one block starting at `open`. Returns the candidate and the row
/// index scanning should resume from, or `None` if no amount terminates the
/// block in bounds.
fn stitch_block(
    rows: &[Row],
    open: usize,
    consumed: usize,
    day: u32,
    month: u32,
    amounts: &AmountMatcher,
) -> Option<(TransactionCandidate, usize)> {
    let last = (open + MAX_LOOKAHEAD).min(rows.len() - 1);
    let mut description_tokens = Vec::new();

    for j in open..=last {
        if j > open && date_opening(&rows[j]).is_some() {
            return None;
        }

        let start = if j == open { consumed } else { 0 };
        let tokens = &rows[j].tokens[start..];

        for (k, token) in tokens.iter().enumerate() {
            let Some(mut amount) = amounts.match_token(token) else {
                description_tokens.push(token.clone());
                continue;
            };

            // Detached Cr/Dr marker directly after the amount.
            let mut rest = k + 1;
            if amount.marker.is_none() {
                if let Some(marker) = tokens.get(rest).and_then(|t| Marker::from_token(t)) {
                    amount.marker = Some(marker);
                    rest += 1;
                }
            }

            let running_balance = find_running_balance(rows, j, start + rest, last, amounts);

            return Some((
                TransactionCandidate {
                    day,
                    month,
                    description_tokens,
                    amount,
                    running_balance,
                    opening_row_text: rows[open].text.clone(),
                },
                j + 1,
            ));
        }
    }

    None
}

/// The running balance is the next amount-shaped token after the
/// transaction amount, on the same row or on a following row before the
/// next date opener.
fn find_running_balance(
    rows: &[Row],
    amount_row: usize,
    after_token: usize,
    last: usize,
    amounts: &AmountMatcher,
) -> Option<f64> {
    for token in &rows[amount_row].tokens[after_token..] {
        if let Some(balance) = amounts.match_token(token) {
            return Some(balance.balance_signed());
        }
    }

    for row in &rows[amount_row + 1..=last] {
        if date_opening(row).is_some() {
            return None;
        }
        for token in &row.tokens {
            if let Some(balance) = amounts.match_token(token) {
                return Some(balance.balance_signed());
            }
        }
    }

    None
}
