use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::domain::{
    Account, AccountId, AccountLock, Activity, ActivityId, ActivityWindow, Error,
    LoadAccountPort, Money, OutputRepository, UpdateAccountStatePort,
};

/// Accounts and their activities kept in memory for the length of a run.
#[derive(Default, Debug)]
pub struct InMemoryLedger {
    accounts: BTreeMap<AccountId, Money>, // opening balances
    activities: Vec<Activity>,
    last_activity_id: u64,
    locked: HashSet<AccountId>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_account(&mut self, account_id: AccountId, balance: Money) -> Result<(), Error> {
        if balance.is_negative() {
            return Err(Error::Validation(format!(
                "Account {} cannot open with negative balance {}",
                account_id, balance
            )));
        }

        match self.accounts.entry(account_id) {
            Entry::Vacant(e) => {
                e.insert(balance);
                Ok(())
            }
            Entry::Occupied(_) => Err(Error::Validation(format!(
                "Account ID {} already exists",
                account_id
            ))),
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn is_locked(&self, account_id: AccountId) -> bool {
        self.locked.contains(&account_id)
    }

    /// Balance over the account's whole history.
    pub fn balance_of(&self, account_id: AccountId) -> Result<Money, Error> {
        self.load_account(account_id, DateTime::<Utc>::MIN_UTC)?
            .calculate_balance()
    }

    fn next_activity_id(&mut self) -> ActivityId {
        self.last_activity_id += 1;
        ActivityId(self.last_activity_id)
    }
}

impl LoadAccountPort for InMemoryLedger {
    fn load_account(
        &self,
        account_id: AccountId,
        baseline_date: DateTime<Utc>,
    ) -> Result<Account, Error> {
        let opening_balance = self
            .accounts
            .get(&account_id)
            .copied()
            .ok_or(Error::AccountNotFound(account_id))?;

        let (window, archived): (Vec<Activity>, Vec<Activity>) = self
            .activities
            .iter()
            .filter(|a| a.owner_account_id() == account_id)
            .cloned()
            .partition(|a| a.timestamp() >= baseline_date);

        let baseline_balance =
            opening_balance.add(ActivityWindow::new(archived).calculate_balance(account_id)?)?;

        Ok(Account::with_id(
            account_id,
            baseline_balance,
            ActivityWindow::new(window),
        ))
    }
}

impl UpdateAccountStatePort for InMemoryLedger {
    fn update_activities(&mut self, account: &Account) -> Result<(), Error> {
        let account_id = account.id().ok_or(Error::UnidentifiedAccount)?;
        if !self.accounts.contains_key(&account_id) {
            return Err(Error::AccountNotFound(account_id));
        }

        for activity in account.activity_window().unsaved_activities() {
            let id = self.next_activity_id();
            let stored = activity.clone().with_id(id);
            debug!(activity = %stored, "Activity stored");
            self.activities.push(stored);
        }
        Ok(())
    }
}

impl AccountLock for InMemoryLedger {
    fn lock_account(&mut self, account_id: AccountId) -> Result<(), Error> {
        if self.locked.insert(account_id) {
            Ok(())
        } else {
            Err(Error::AccountLocked(account_id))
        }
    }

    fn release_account(&mut self, account_id: AccountId) {
        self.locked.remove(&account_id);
    }
}

impl OutputRepository for InMemoryLedger {
    fn flush(&self) {
        println!("account,balance");
        for account_id in self.accounts.keys() {
            match self.balance_of(*account_id) {
                Ok(balance) => println!("{},{}", account_id, balance),
                Err(e) => error!(account = %account_id, error = %e, "Cannot report balance"),
            }
        }
    }
}
