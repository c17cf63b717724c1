//! CSV front end for the ledger: reads account and posting rows, then prints
//! the transaction log, balances and reports.

use std::io::{Read, Write};

use crate::{
    ledger::{Ledger, LedgerError, in_memory_ledger::InMemoryLedger},
    money::RawAmount,
};
use anyhow::{Context, Result};
use csv_parser::{CsvLedgerParser, LedgerRow, RowKind};
use text_printer::print_ledger;
use tracing::debug;
pub mod csv_parser;
pub mod text_printer;

pub const DEFAULT_CURRENCY: &str = "kr";

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub currency: String,
    pub error_printer: Box<dyn FnMut(u64, LedgerError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvLedgerParser::new(self.input);

        let mut ledger = InMemoryLedger::new();

        for (line, row) in parser {
            let row = row.with_context(|| format!("Malformed row at line {line}"))?;
            match apply_row(&mut ledger, &row) {
                Ok(()) => debug!(line, kind = ?row.kind, account = %row.account, "row applied"),
                Err(err) => (self.error_printer)(line, err),
            }
        }

        print_ledger(self.output, &ledger, &self.currency)
    }
}

fn apply_row(ledger: &mut impl Ledger, row: &LedgerRow) -> Result<(), LedgerError> {
    match row.kind {
        RowKind::Account => ledger.create_account(&row.account),
        RowKind::Posting => ledger.post_transaction(
            &row.date,
            &row.description,
            &row.account,
            RawAmount::Text(&row.amount),
        ),
    }
}
