use chrono::{DateTime, Utc};
use futures::Stream;

use crate::domain::{Account, AccountId, Error};
use crate::send_money::SendMoneyCommand;

pub trait CommandStream {
    type Commands: Stream<Item = Result<SendMoneyCommand, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::Commands;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

pub trait LoadAccountPort {
    /// Loads `account_id` with the activities from `baseline_date` onwards in
    /// its window; everything older is folded into the baseline balance.
    fn load_account(
        &self,
        account_id: AccountId,
        baseline_date: DateTime<Utc>,
    ) -> Result<Account, Error>;
}

pub trait UpdateAccountStatePort {
    /// Stores the activities of `account` that have no id yet.
    fn update_activities(&mut self, account: &Account) -> Result<(), Error>;
}

pub trait AccountLock {
    fn lock_account(&mut self, account_id: AccountId) -> Result<(), Error>;
    fn release_account(&mut self, account_id: AccountId);
}

pub trait OutputRepository: LoadAccountPort + UpdateAccountStatePort + AccountLock {
    fn flush(&self);
}
