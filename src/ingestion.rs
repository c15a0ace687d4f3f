use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::domain::traits::CommandStream;
use crate::domain::{AccountId, Error, Money};
use crate::send_money::SendMoneyCommand;

/// Opening balance of one account, as read from the accounts file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSeed {
    pub account_id: AccountId,
    pub balance: Money,
}

#[derive(Debug, Deserialize)]
struct AccountRow {
    account: u64,
    balance: Money,
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct TransferRow {
    source: u64,
    target: u64,
    amount: Option<Money>,
}

impl TryFrom<TransferRow> for SendMoneyCommand {
    type Error = Error;

    fn try_from(row: TransferRow) -> Result<Self, Self::Error> {
        let money = row.amount.ok_or_else(|| {
            Error::Ingestion(format!(
                "Missing amount for transfer {} -> {}",
                row.source, row.target
            ))
        })?;

        SendMoneyCommand::new(AccountId(row.source), AccountId(row.target), money)
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Reads the whole accounts file; a malformed row aborts the load.
pub fn read_accounts<R: Read>(reader: R) -> Result<Vec<AccountSeed>, Error> {
    csv_reader(reader)
        .into_deserialize::<AccountRow>()
        .map(|row_res| {
            row_res
                .map(|row| AccountSeed {
                    account_id: AccountId(row.account),
                    balance: row.balance,
                })
                .map_err(|e| Error::Ingestion(format!("CSV deserialization error: {}", e)))
        })
        .collect()
}

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(csv_reader(reader)),
        }
    }
}

impl<R: Read + Send + 'static> CommandStream for CsvReader<R> {
    type Commands = Pin<Box<dyn Stream<Item = Result<SendMoneyCommand, Error>> + Send>>;

    fn stream(&mut self) -> Self::Commands {
        let reader = match self.reader.take() {
            Some(r) => r,
            // Already consumed.
            None => return Box::pin(stream::empty::<Result<SendMoneyCommand, Error>>()),
        };

        let iter = reader
            .into_deserialize::<TransferRow>()
            .map(|row_res| match row_res {
                Ok(row) => SendMoneyCommand::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}
