use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::config::TransferConfig;
use crate::domain::{
    Account, AccountId, AccountLock, Error, LoadAccountPort, Money, UpdateAccountStatePort,
};

/// A request to move `money` from one account to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMoneyCommand {
    source_account_id: AccountId,
    target_account_id: AccountId,
    money: Money,
}

impl SendMoneyCommand {
    pub fn new(
        source_account_id: AccountId,
        target_account_id: AccountId,
        money: Money,
    ) -> Result<Self, Error> {
        if !money.is_positive() {
            return Err(Error::Validation(format!(
                "Transfer amount must be positive, got {}",
                money
            )));
        }
        if source_account_id == target_account_id {
            return Err(Error::Validation(format!(
                "Source and target account are both {}",
                source_account_id
            )));
        }

        Ok(Self {
            source_account_id,
            target_account_id,
            money,
        })
    }

    pub fn source_account_id(&self) -> AccountId {
        self.source_account_id
    }

    pub fn target_account_id(&self) -> AccountId {
        self.target_account_id
    }

    pub fn money(&self) -> Money {
        self.money
    }
}

impl core::fmt::Display for SendMoneyCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "source={},target={},amount={}",
            self.source_account_id, self.target_account_id, self.money
        )
    }
}

pub trait SendMoneyUseCase {
    /// Returns `Ok(false)` when the source account cannot cover the transfer.
    fn send_money(&mut self, command: &SendMoneyCommand) -> Result<bool, Error>;
}

#[derive(Debug)]
pub struct SendMoneyService<R>
where
    R: LoadAccountPort + UpdateAccountStatePort + AccountLock,
{
    repository: R,
    config: TransferConfig,
}

impl<R> SendMoneyService<R>
where
    R: LoadAccountPort + UpdateAccountStatePort + AccountLock,
{
    pub fn new(repository: R, config: TransferConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn check_threshold(&self, command: &SendMoneyCommand) -> Result<(), Error> {
        let threshold = self.config.maximum_transfer_threshold;
        if command.money() > threshold {
            return Err(Error::ThresholdExceeded {
                threshold,
                actual: command.money(),
            });
        }
        Ok(())
    }

    // Runs with the source account locked.
    fn withdraw_locked(
        &mut self,
        command: &SendMoneyCommand,
        baseline_date: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mut source = self
            .repository
            .load_account(command.source_account_id(), baseline_date)?;

        if !source.withdraw(command.money(), command.target_account_id())? {
            warn!(
                account = %command.source_account_id(),
                amount = %command.money(),
                "Withdrawal denied, insufficient funds"
            );
            return Ok(false);
        }

        self.repository.lock_account(command.target_account_id())?;
        let result = self.deposit_locked(&source, command, baseline_date);
        self.repository.release_account(command.target_account_id());
        result
    }

    // Runs with both accounts locked.
    fn deposit_locked(
        &mut self,
        source: &Account,
        command: &SendMoneyCommand,
        baseline_date: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mut target = self
            .repository
            .load_account(command.target_account_id(), baseline_date)?;
        target.deposit(command.money(), command.source_account_id())?;

        self.repository.update_activities(source)?;
        self.repository.update_activities(&target)?;
        Ok(true)
    }
}

impl<R> SendMoneyUseCase for SendMoneyService<R>
where
    R: LoadAccountPort + UpdateAccountStatePort + AccountLock,
{
    /// Each account is locked before it is loaded, so the balance checked by
    /// the withdrawal cannot go stale while the transfer runs.
    #[instrument(skip_all, fields(command = %command))]
    fn send_money(&mut self, command: &SendMoneyCommand) -> Result<bool, Error> {
        self.check_threshold(command)?;

        let baseline_date = self.config.baseline_date(Utc::now())?;
        debug!(%baseline_date, "Loading accounts");

        self.repository.lock_account(command.source_account_id())?;
        let result = self.withdraw_locked(command, baseline_date);
        self.repository.release_account(command.source_account_id());

        if let Ok(true) = result {
            info!("Transfer completed");
        }
        result
    }
}
