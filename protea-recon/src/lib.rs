//! protea-recon: turns extracted statement rows into a signed transaction
//! ledger and reconciles it against declared opening/closing balances.

pub mod balance;
pub mod candidate;
pub mod ledger;
pub mod reconcile;
pub mod statement;
pub mod year;

pub use balance::extract_balances;
pub use candidate::{MAX_LOOKAHEAD, TransactionCandidate, collect_candidates, date_opening};
pub use ledger::build_ledger;
pub use reconcile::{ContinuityBreak, build_report, check_continuity};
pub use statement::{ParseOptions, ParsedStatement, parse_statement};
pub use year::{YearResolution, YearSource, resolve_statement_year};
