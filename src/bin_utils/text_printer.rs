use std::io::Write;

use anyhow::{Context, Result};

use crate::ledger::Ledger;

/// Writes the transaction log, every balance and both reports.
/// `currency` is only a label appended to each amount. Nothing is written
/// when a report total is out of range.
pub fn print_ledger<W>(output: &mut W, ledger: &impl Ledger, currency: &str) -> Result<()>
where
    W: Write,
{
    let income = ledger
        .income_statement()
        .context("Failed to compute the income statement")?;
    let sheet = ledger
        .balance_sheet()
        .context("Failed to compute the balance sheet")?;

    writeln!(output, "Transactions:")?;
    for tx in ledger.all_transactions() {
        writeln!(output, "{tx} {currency}")?;
    }

    writeln!(output, "\nBalances:")?;
    for (account, balance) in ledger.all_balances().iter() {
        writeln!(output, "{account}: {balance} {currency}")?;
    }

    writeln!(output, "\nIncome statement:")?;
    writeln!(output, "Revenue: {} {currency}", income.revenue)?;
    writeln!(output, "Expense: {} {currency}", income.expense)?;
    writeln!(output, "Net result: {} {currency}", income.net_result)?;

    writeln!(output, "\nBalance sheet:")?;
    writeln!(output, "Assets: {} {currency}", sheet.assets)?;
    writeln!(output, "Liabilities: {} {currency}", sheet.liabilities)?;
    writeln!(output, "Equity: {} {currency}", sheet.equity)?;

    output.flush().context("Failed to flush ledger output")
}
