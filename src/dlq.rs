use tracing::warn;

use crate::domain::{DeadLetterQueue, Error};

/// Reports rejected transfers on the log, which goes to stderr.
#[derive(Default, Debug)]
pub struct StdErrDLQ {}

impl DeadLetterQueue for StdErrDLQ {
    fn report(&self, error: &Error) {
        warn!(error = %error, "Transfer rejected");
    }
}
