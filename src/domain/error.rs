use crate::domain::{AccountId, Money};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Validation failed with: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Money arithmetic overflowed")]
    Overflow,

    #[error("Activity window is empty")]
    EmptyWindow,

    #[error("Account has no id yet")]
    UnidentifiedAccount,

    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    #[error("Account {0} is locked by another transfer")]
    AccountLocked(AccountId),

    #[error("Insufficient funds on account {0}")]
    InsufficientFunds(AccountId),

    #[error("Transfer of {actual} exceeds the threshold of {threshold}")]
    ThresholdExceeded { threshold: Money, actual: Money },
}
