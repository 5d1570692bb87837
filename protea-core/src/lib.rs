//! protea-core: shared ledger types, money parsing and categorization
//! for FNB-style statement processing.

pub mod category;
pub mod diagnostics;
pub mod ledger;
pub mod money;

pub use category::{Categorizer, Category, KeywordRule, categorize};
pub use diagnostics::Diagnostic;
pub use ledger::{
    BalanceSource, ReconciliationReport, SignBasis, StatementBalances, Transaction,
};
pub use money::{AmountMatcher, AmountToken, Marker, format_amount, round2};
