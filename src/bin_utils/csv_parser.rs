use std::io::Read;

use csv::{DeserializeRecordsIntoIter, Trim};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Account,
    Posting,
}

/// One line of the ledger input. Posting fields left out of the row are
/// passed on as empty strings, so the ledger rejects them like any bad input.
#[derive(Debug, Deserialize)]
pub struct LedgerRow {
    #[serde(rename = "type")]
    pub kind: RowKind,
    pub account: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
}

/// Parses ledger rows in CSV format, yielding each row with its line number.
///
/// A row that is not valid CSV, or has an unknown `type`, is yielded as the
/// `csv::Error` instead of a row; the caller decides whether to stop.
pub struct CsvLedgerParser<R> {
    iter: DeserializeRecordsIntoIter<R, LedgerRow>,
}

impl<R> CsvLedgerParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvLedgerParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<LedgerRow>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
