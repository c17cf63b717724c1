use crate::{
    command::PostingCommand,
    money::{AmountError, Money},
};

/// Result of a validated posting, carries the balance it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEvent {
    amount: Money,
    balance_after: Money,
}

impl AccountEvent {
    pub fn amount(&self) -> Money {
        self.amount
    }
}

#[derive(Debug, Default, Clone)]
pub struct Account {
    balance: Money,
}

impl Account {
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        self.balance = event.balance_after;
    }

    pub fn handle_posting(&self, command: &PostingCommand) -> Result<AccountEvent, AmountError> {
        let balance_after =
            self.balance
                .checked_add(command.amount)
                .ok_or(AmountError::Overflow {
                    balance: self.balance,
                    amount: command.amount,
                })?;
        Ok(AccountEvent {
            amount: command.amount,
            balance_after,
        })
    }
}
