use chrono::{DateTime, Utc};

use crate::domain::{AccountId, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActivityId(pub u64);

impl core::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One leg of a transfer, recorded in the ledger of `owner_account_id`.
///
/// Activities are created without an id; the repository assigns one when
/// it stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    id: Option<ActivityId>,
    owner_account_id: AccountId,
    source_account_id: AccountId,
    target_account_id: AccountId,
    timestamp: DateTime<Utc>,
    money: Money,
}

impl Activity {
    pub fn new(
        owner_account_id: AccountId,
        source_account_id: AccountId,
        target_account_id: AccountId,
        timestamp: DateTime<Utc>,
        money: Money,
    ) -> Self {
        Self {
            id: None,
            owner_account_id,
            source_account_id,
            target_account_id,
            timestamp,
            money,
        }
    }

    pub fn with_id(self, id: ActivityId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn id(&self) -> Option<ActivityId> {
        self.id
    }

    pub fn owner_account_id(&self) -> AccountId {
        self.owner_account_id
    }

    pub fn source_account_id(&self) -> AccountId {
        self.source_account_id
    }

    pub fn target_account_id(&self) -> AccountId {
        self.target_account_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn money(&self) -> Money {
        self.money
    }
}

impl core::fmt::Display for Activity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.id {
            Some(id) => write!(
                f,
                "activity={},owner={},source={},target={},amount={}",
                id, self.owner_account_id, self.source_account_id, self.target_account_id, self.money
            ),
            None => write!(
                f,
                "owner={},source={},target={},amount={}",
                self.owner_account_id, self.source_account_id, self.target_account_id, self.money
            ),
        }
    }
}
