pub mod account;
pub mod activity;
pub mod activity_window;
pub mod error;
pub mod money;
pub mod traits;

pub use account::{Account, AccountId, AccountIdentity};
pub use activity::{Activity, ActivityId};
pub use activity_window::ActivityWindow;
pub use error::Error;
pub use money::Money;
pub use traits::{
    AccountLock, CommandStream, DeadLetterQueue, LoadAccountPort, OutputRepository,
    UpdateAccountStatePort,
};
