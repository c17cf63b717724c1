use chrono::NaiveDate;

use crate::{
    ledger::LedgerError,
    money::{Money, RawAmount},
};

/// Only accepted date layout, `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Posting whose date, account and amount have been checked, but not yet
/// applied to the account balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingCommand {
    pub date: NaiveDate,
    pub description: String,
    pub account: String,
    pub amount: Money,
}

impl PostingCommand {
    /// Checks the date, then that `account_exists`, then the amount, and
    /// reports the first failure.
    pub fn parse<'a>(
        date: &str,
        description: &str,
        account: &str,
        amount: impl Into<RawAmount<'a>>,
        account_exists: impl FnOnce(&str) -> bool,
    ) -> Result<Self, LedgerError> {
        let date = parse_date(date)?;
        if !account_exists(account) {
            return Err(LedgerError::UnknownAccount(account.to_owned()));
        }
        let amount = Money::quantize(amount)?;
        Ok(Self {
            date,
            description: description.to_owned(),
            account: account.to_owned(),
            amount,
        })
    }
}

/// Parses an ISO calendar date written exactly as `YYYY-MM-DD`.
///
/// `chrono` alone would also take `2025-1-5` or a five digit year, so the
/// shape is checked before the calendar is.
pub fn parse_date(input: &str) -> Result<NaiveDate, LedgerError> {
    let invalid = || LedgerError::InvalidDate {
        input: input.to_owned(),
    };
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}
