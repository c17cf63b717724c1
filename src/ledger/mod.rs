use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::{
    money::{AmountError, Money, RawAmount},
    report::{self, BalanceSheet, IncomeStatement},
};

pub mod in_memory_ledger;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Account '{0}' already exists")]
    DuplicateAccount(String),
    #[error("Account '{0}' does not exist")]
    UnknownAccount(String),
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),
}

/// Posted entry. Only the ledger creates these, and never changes them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    date: NaiveDate,
    description: String,
    account: String,
    amount: Money,
}

impl Transaction {
    pub(crate) fn new(date: NaiveDate, description: String, account: String, amount: Money) -> Self {
        Self {
            date,
            description,
            account,
            amount,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn amount(&self) -> Money {
        self.amount
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.date, self.description, self.account, self.amount
        )
    }
}

/// Snapshot of account balances, in the order the accounts were created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Balances(Vec<(String, Money)>);

impl Balances {
    pub fn get(&self, account: &str) -> Option<Money> {
        self.0
            .iter()
            .find(|(name, _)| name == account)
            .map(|(_, balance)| *balance)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.0.iter().map(|(name, balance)| (name.as_str(), *balance))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Money)> for Balances {
    fn from_iter<T: IntoIterator<Item = (String, Money)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Account and transaction store.
///
/// Mutating calls take `&mut self`; callers sharing a ledger between threads
/// need to put it behind a mutex themselves.
pub trait Ledger {
    /// Opens an account at `0.00`.
    fn create_account(&mut self, name: &str) -> Result<(), LedgerError>;

    /// Adds the quantized `amount` to the account and records the transaction.
    /// On error nothing is changed.
    fn post_transaction(
        &mut self,
        date: &str,
        description: &str,
        account_name: &str,
        amount: RawAmount<'_>,
    ) -> Result<(), LedgerError>;

    fn balance_of(&self, account_name: &str) -> Result<Money, LedgerError>;

    /// Transactions in posting order.
    fn all_transactions(&self) -> &[Transaction];

    fn all_balances(&self) -> Balances;

    fn income_statement(&self) -> Result<IncomeStatement, LedgerError> {
        Ok(report::income_statement(&self.all_balances())?)
    }

    fn balance_sheet(&self) -> Result<BalanceSheet, LedgerError> {
        Ok(report::balance_sheet(&self.all_balances())?)
    }
}
