/// Two-decimal amounts and the one parse step for raw amount input.
pub mod money;

/// Validation of raw posting input into a command the ledger can apply.
pub mod command;

/// Single account balance. Postings are validated into events, which are
/// then applied to the balance.
pub mod account;

/// Ledger interface, plus "in memory" implementation.
/// Owns accounts and the transaction log, coordinates command parsing and
/// account updates.
pub mod ledger;

/// Income statement and balance sheet, derived from a balances snapshot.
pub mod report;

/// CSV driven front end. Lives in the library so the integration tests can
/// run it without spawning the binary.
pub mod bin_utils;

pub use ledger::{Balances, Ledger, LedgerError, Transaction, in_memory_ledger::InMemoryLedger};
pub use money::{AmountError, Money, RawAmount};
pub use report::{AccountClass, BalanceSheet, IncomeStatement, balance_sheet, income_statement};
