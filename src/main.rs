use std::{env, fs::File};

use transfer_ledger::config::TransferConfig;
use transfer_ledger::dlq::StdErrDLQ;
use transfer_ledger::engine::Engine;
use transfer_ledger::ingestion::{self, CsvReader};
use transfer_ledger::logging::init_logging;
use transfer_ledger::output_repository::InMemoryLedger;

const USAGE: &str = "usage: transfer_ledger <accounts.csv> <transfers.csv>";

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut args = env::args();
    let accounts_path = args.nth(1).ok_or(USAGE)?;
    let transfers_path = args.next().ok_or(USAGE)?;

    let config = TransferConfig::from_env()?;

    let mut ledger = InMemoryLedger::new();
    for seed in ingestion::read_accounts(File::open(&accounts_path)?)? {
        ledger.open_account(seed.account_id, seed.balance)?;
    }

    let transfers = CsvReader::new(File::open(&transfers_path)?);
    let mut engine = Engine::new(transfers, ledger, StdErrDLQ::default(), config);

    engine.process().await?;
    engine.flush();

    Ok(())
}
