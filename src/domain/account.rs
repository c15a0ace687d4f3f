use chrono::Utc;

use crate::domain::{Activity, ActivityWindow, Error, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub u64);

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountIdentity {
    /// Not persisted yet.
    Unsaved,
    Saved(AccountId),
}

/// An account whose balance is derived from a baseline plus its activity window.
///
/// The aggregate guards the overdraft rule: [`Account::withdraw`] refuses any
/// withdrawal that would leave the calculated balance below zero.
#[derive(Debug, Clone)]
pub struct Account {
    identity: AccountIdentity,
    baseline_balance: Money, // balance before the first activity in the window
    activity_window: ActivityWindow,
}

impl Account {
    pub fn without_id(baseline_balance: Money, activity_window: ActivityWindow) -> Self {
        Self {
            identity: AccountIdentity::Unsaved,
            baseline_balance,
            activity_window,
        }
    }

    pub fn with_id(
        account_id: AccountId,
        baseline_balance: Money,
        activity_window: ActivityWindow,
    ) -> Self {
        Self {
            identity: AccountIdentity::Saved(account_id),
            baseline_balance,
            activity_window,
        }
    }

    pub fn identity(&self) -> AccountIdentity {
        self.identity
    }

    pub fn id(&self) -> Option<AccountId> {
        match self.identity {
            AccountIdentity::Saved(id) => Some(id),
            AccountIdentity::Unsaved => None,
        }
    }

    pub fn baseline_balance(&self) -> Money {
        self.baseline_balance
    }

    pub fn activity_window(&self) -> &ActivityWindow {
        &self.activity_window
    }

    pub fn calculate_balance(&self) -> Result<Money, Error> {
        let id = self.require_id()?;
        self.baseline_balance
            .add(self.activity_window.calculate_balance(id)?)
    }

    /// Withdraws `money` towards `target_account_id`.
    ///
    /// Returns `Ok(false)` without touching the window when the balance does
    /// not cover the amount.
    pub fn withdraw(&mut self, money: Money, target_account_id: AccountId) -> Result<bool, Error> {
        let id = self.require_id()?;

        if !self.may_withdraw(money)? {
            return Ok(false);
        }

        let withdrawal = Activity::new(id, id, target_account_id, Utc::now(), money);
        self.activity_window.add_activity(withdrawal);
        Ok(true)
    }

    pub fn deposit(&mut self, money: Money, source_account_id: AccountId) -> Result<bool, Error> {
        let id = self.require_id()?;

        let deposit = Activity::new(id, source_account_id, id, Utc::now(), money);
        self.activity_window.add_activity(deposit);
        Ok(true)
    }

    fn may_withdraw(&self, money: Money) -> Result<bool, Error> {
        Ok(self
            .calculate_balance()?
            .add(money.negate())?
            .is_positive_or_zero())
    }

    fn require_id(&self) -> Result<AccountId, Error> {
        self.id().ok_or(Error::UnidentifiedAccount)
    }
}
