use serde::Serialize;

use crate::{
    ledger::Balances,
    money::{AmountError, Money},
};

/// Account class encoded in the leading digit of an account name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountClass {
    Asset,
    Liability,
    Revenue,
    Expense,
}

impl AccountClass {
    /// `None` for names no report looks at, such as `4xxx`, `8xxx` or `Kassa`.
    pub fn from_account_name(name: &str) -> Option<Self> {
        match name.chars().next()? {
            '1' => Some(Self::Asset),
            '2' => Some(Self::Liability),
            '3' => Some(Self::Revenue),
            '5' | '6' | '7' => Some(Self::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncomeStatement {
    pub revenue: Money,
    pub expense: Money,
    pub net_result: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    pub assets: Money,
    pub liabilities: Money,
    pub equity: Money,
}

fn total(balances: &Balances, class: AccountClass) -> Result<Money, AmountError> {
    balances
        .iter()
        .filter(|(name, _)| AccountClass::from_account_name(name) == Some(class))
        .try_fold(Money::zero(), |sum, (_, balance)| {
            sum.checked_add(balance).ok_or(AmountError::Overflow {
                balance: sum,
                amount: balance,
            })
        })
}

fn difference(minuend: Money, subtrahend: Money) -> Result<Money, AmountError> {
    minuend
        .checked_sub(subtrahend)
        .ok_or(AmountError::Overflow {
            balance: minuend,
            amount: -subtrahend,
        })
}

/// Revenue (`3xxx`) against expenses (`5xxx`-`7xxx`). Other accounts are left out.
///
/// Fails when a total leaves the decimal range, which the ledger cannot rule
/// out since it only bounds each account on its own.
pub fn income_statement(balances: &Balances) -> Result<IncomeStatement, AmountError> {
    let revenue = total(balances, AccountClass::Revenue)?;
    let expense = total(balances, AccountClass::Expense)?;
    Ok(IncomeStatement {
        revenue,
        expense,
        net_result: difference(revenue, expense)?,
    })
}

/// Assets (`1xxx`) against liabilities (`2xxx`), equity is the difference.
///
/// Accounts of any other class are not part of either side, so the sheet only
/// balances against the postings when every account is a `1xxx` or `2xxx` one.
pub fn balance_sheet(balances: &Balances) -> Result<BalanceSheet, AmountError> {
    let assets = total(balances, AccountClass::Asset)?;
    let liabilities = total(balances, AccountClass::Liability)?;
    Ok(BalanceSheet {
        assets,
        liabilities,
        equity: difference(assets, liabilities)?,
    })
}
