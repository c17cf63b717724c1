use std::collections::{HashMap, hash_map::Entry};

use crate::{
    account::Account,
    command::PostingCommand,
    money::{Money, RawAmount},
};

use super::{Balances, Ledger, LedgerError, Transaction};

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    // position of every account in `accounts`
    index: HashMap<String, usize>,
    accounts: Vec<(String, Account)>,
    transactions: Vec<Transaction>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn account(&self, name: &str) -> Result<&Account, LedgerError> {
        self.index
            .get(name)
            .map(|&idx| &self.accounts[idx].1)
            .ok_or_else(|| LedgerError::UnknownAccount(name.to_owned()))
    }
}

impl Ledger for InMemoryLedger {
    fn create_account(&mut self, name: &str) -> Result<(), LedgerError> {
        match self.index.entry(name.to_owned()) {
            Entry::Occupied(entry) => Err(LedgerError::DuplicateAccount(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(self.accounts.len());
                self.accounts.push((name.to_owned(), Account::default()));
                Ok(())
            }
        }
    }

    fn post_transaction(
        &mut self,
        date: &str,
        description: &str,
        account_name: &str,
        amount: RawAmount<'_>,
    ) -> Result<(), LedgerError> {
        let command = PostingCommand::parse(date, description, account_name, amount, |name| {
            self.index.contains_key(name)
        })?;
        let acc = self
            .index
            .get(&command.account)
            .and_then(|&idx| self.accounts.get_mut(idx))
            .map(|(_, acc)| acc)
            .ok_or_else(|| LedgerError::UnknownAccount(command.account.clone()))?;
        let evt = acc.handle_posting(&command)?;
        acc.apply(&evt);
        // recorded only once the account accepted the posting
        self.transactions.push(Transaction::new(
            command.date,
            command.description,
            command.account,
            evt.amount(),
        ));
        Ok(())
    }

    fn balance_of(&self, account_name: &str) -> Result<Money, LedgerError> {
        self.account(account_name).map(Account::balance)
    }

    fn all_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn all_balances(&self) -> Balances {
        self.accounts
            .iter()
            .map(|(name, acc)| (name.clone(), acc.balance()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::money::AmountError;

    use super::*;

    fn ledger_with(accounts: &[&str]) -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        for name in accounts {
            ledger.create_account(name).unwrap();
        }
        ledger
    }

    #[test]
    fn new_accounts_start_at_zero() {
        let ledger = ledger_with(&["1910", "Kassa"]);
        assert_eq!(ledger.balance_of("1910").unwrap(), Money::zero());
        assert_eq!(ledger.balance_of("Kassa").unwrap().to_string(), "0.00");
        assert!(ledger.all_transactions().is_empty());
    }

    #[test]
    fn duplicate_account_keeps_balance() {
        let mut ledger = ledger_with(&["1910"]);
        ledger
            .post_transaction("2025-01-02", "deposit", "1910", "25.50".into())
            .unwrap();

        let err = ledger.create_account("1910").unwrap_err();
        assert!(matches!(&err, LedgerError::DuplicateAccount(name) if name == "1910"));
        assert_eq!(err.to_string(), "Account '1910' already exists");
        assert_eq!(ledger.balance_of("1910").unwrap().amount(), dec!(25.50));
        assert_eq!(ledger.all_balances().len(), 1);
    }

    #[test]
    fn postings_accumulate_and_are_logged_in_order() {
        let mut ledger = ledger_with(&["1910"]);
        ledger
            .post_transaction("2025-01-02", "first", "1910", "10.005".into())
            .unwrap();
        ledger
            .post_transaction("2025-01-01", "second", "1910", (-3).into())
            .unwrap();
        ledger
            .post_transaction("2025-01-03", "third", "1910", 0.1.into())
            .unwrap();

        assert_eq!(ledger.balance_of("1910").unwrap().amount(), dec!(7.11));
        let descriptions: Vec<_> = ledger
            .all_transactions()
            .iter()
            .map(Transaction::description)
            .collect();
        assert_eq!(descriptions, ["first", "second", "third"]);
        assert_eq!(
            ledger.all_transactions()[0].to_string(),
            "2025-01-02 | first | 1910 | 10.01"
        );
    }

    #[test]
    fn failed_postings_change_nothing() {
        let mut ledger = ledger_with(&["1910"]);
        ledger
            .post_transaction("2025-01-02", "ok", "1910", 100.into())
            .unwrap();
        let balances = ledger.all_balances();

        let err = ledger
            .post_transaction("2025-01-02", "missing", "1920", 5.into())
            .unwrap_err();
        assert!(matches!(&err, LedgerError::UnknownAccount(name) if name == "1920"));

        let err = ledger
            .post_transaction("2025/13/40", "bad date", "1910", 5.into())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDate { .. }));

        let err = ledger
            .post_transaction("2025-01-02", "bad amount", "1910", "ten".into())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidAmount(AmountError::NotNumeric { .. })
        ));

        let err = ledger
            .post_transaction("2025-01-02", "too much", "1910", Decimal::MAX.into())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidAmount(AmountError::Overflow { .. })
        ));

        assert_eq!(ledger.all_balances(), balances);
        assert_eq!(ledger.all_transactions().len(), 1);
    }

    #[test]
    fn unknown_account_is_reported_before_bad_amount() {
        let mut ledger = InMemoryLedger::new();
        let err = ledger
            .post_transaction("2025-01-01", "", "nope", "abc".into())
            .unwrap_err();
        assert!(matches!(&err, LedgerError::UnknownAccount(name) if name == "nope"));

        // the date still comes first
        let err = ledger
            .post_transaction("2025-1-1", "", "nope", "abc".into())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDate { .. }));
        assert!(ledger.all_transactions().is_empty());
    }

    #[test]
    fn balance_of_unknown_account() {
        let ledger = ledger_with(&["1910"]);
        assert!(matches!(
            ledger.balance_of("3000"),
            Err(LedgerError::UnknownAccount(_))
        ));
    }

    #[test]
    fn snapshots_follow_creation_order_and_repeat() {
        let mut ledger = ledger_with(&["3000", "1910", "2440"]);
        ledger
            .post_transaction("2025-02-01", "sale", "3000", "99.99".into())
            .unwrap();

        let first = ledger.all_balances();
        let names: Vec<_> = first.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["3000", "1910", "2440"]);
        assert_eq!(first.get("3000").unwrap().to_string(), "99.99");
        assert_eq!(first.get("9999"), None);

        assert_eq!(ledger.all_balances(), first);
        assert_eq!(ledger.all_transactions(), ledger.all_transactions());
    }

    proptest! {
        #[test]
        fn balance_is_order_independent_sum(
            thousandths in prop::collection::vec(-1_000_000_000i64..1_000_000_000i64, 1..20)
        ) {
            let amounts: Vec<Decimal> = thousandths.iter().map(|c| Decimal::new(*c, 3)).collect();
            let expected: Money = amounts
                .iter()
                .map(|a| Money::quantize(*a).unwrap())
                .sum();

            let mut forward = ledger_with(&["1910"]);
            let mut backward = ledger_with(&["1910"]);
            for amount in &amounts {
                forward.post_transaction("2025-01-01", "", "1910", (*amount).into()).unwrap();
            }
            for amount in amounts.iter().rev() {
                backward.post_transaction("2025-01-01", "", "1910", (*amount).into()).unwrap();
            }

            prop_assert_eq!(forward.balance_of("1910").unwrap(), expected);
            prop_assert_eq!(backward.balance_of("1910").unwrap(), expected);
            prop_assert_eq!(forward.all_transactions().len(), amounts.len());
        }
    }
}
